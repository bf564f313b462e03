//! File logging. The terminal belongs to the UI, so records go to a file.

use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io::Write;

pub fn init(path: &str) -> color_eyre::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} {}: {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()?;
    Ok(())
}
