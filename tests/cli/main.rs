use std::{
    env, fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod history;
mod init;
mod untranslated;

const BIN_NAME: &str = "xlate-audit";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    /// Empty project. The `.hg` marker keeps the config search inside it.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        fs::create_dir(project_dir.join(".hg"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// Project with one `strings.xml` per `(values dir, content)` pair under `res/`.
    pub fn with_resources(files: &[(&str, &str)]) -> Result<Self> {
        let test = Self::new()?;
        for (dir, content) in files {
            test.write_strings(dir, content)?;
        }
        Ok(test)
    }

    pub fn write_strings(&self, dir: &str, content: &str) -> Result<()> {
        self.write_file(&format!("res/{}/strings.xml", dir), content)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        // VCS tools are looked up on PATH.
        if let Some(path) = env::var_os("PATH") {
            cmd.env("PATH", path);
        }
        cmd.env("NO_COLOR", "1");
        cmd
    }

    pub fn check_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("check");
        cmd
    }

    pub fn untranslated_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("untranslated");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// `<resources>` document with one `<string>` per `(name, text)` pair.
pub fn strings(entries: &[(&str, &str)]) -> String {
    let mut xml = String::from("<resources>\n");
    for (name, text) in entries {
        xml.push_str(&format!("  <string name=\"{}\">{}</string>\n", name, text));
    }
    xml.push_str("</resources>\n");
    xml
}
