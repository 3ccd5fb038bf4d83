// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use gigcal_core::{APP_NAME, Gigcal};

/// Write a full-state backup (events, tags, settings) to a JSON file.
#[derive(Debug, Clone, Default)]
pub struct CmdBackup {
    pub dir: Option<PathBuf>,
}

impl CmdBackup {
    pub const NAME: &str = "backup";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Write a full-state backup file")
            .arg(
                arg!(--dir <DIR> "Directory to write the file into, defaults to the current one")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::DirPath),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            dir: matches.get_one("dir").cloned(),
        }
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "writing backup...");
        let content = gigcal.backup()?;

        let date = gigcal.today().format("%Y-%m-%d");
        let path = self
            .dir
            .unwrap_or_default()
            .join(format!("{APP_NAME}_backup_{date}.json"));
        fs::write(&path, content)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        println!("Backup written to {}", path.display());
        Ok(())
    }
}

/// Restore state from a backup file. Only the sections present in the file
/// are touched.
#[derive(Debug, Clone)]
pub struct CmdRestore {
    pub file: PathBuf,
}

impl CmdRestore {
    pub const NAME: &str = "restore";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Restore state from a backup file")
            .arg(
                arg!(file: <FILE> "The backup file to restore")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            file: matches
                .get_one::<PathBuf>("file")
                .expect("file is required")
                .clone(),
        }
    }

    pub fn run(self, gigcal: &Gigcal) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "restoring backup...");
        let text = fs::read_to_string(&self.file)
            .map_err(|e| format!("Failed to read {}: {}", self.file.display(), e))?;

        gigcal.restore(&text)?;
        println!("Restored from {}", self.file.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;

    #[test]
    fn test_parse_backup() {
        let cmd = Command::new("test").subcommand(CmdBackup::command());
        let matches = cmd
            .try_get_matches_from(["test", "backup", "--dir", "/tmp"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("backup").unwrap();
        assert_eq!(CmdBackup::from(sub_matches).dir, Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn test_parse_restore() {
        let cmd = Command::new("test").subcommand(CmdRestore::command());
        let matches = cmd
            .try_get_matches_from(["test", "restore", "backup.json"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("restore").unwrap();
        assert_eq!(
            CmdRestore::from(sub_matches).file,
            PathBuf::from("backup.json")
        );
    }
}
