use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Where the job reports its outcome. Mirrors the Actions toolkit's
/// `setOutput` / `setFailed` / `debug`.
pub trait Reporter: Send + Sync {
    fn set_output(&self, name: &str, value: &str) -> Result<()>;
    fn set_failed(&self, message: &str);
    fn debug(&self, message: &str);
}

/// Reports through workflow commands on stdout and the `$GITHUB_OUTPUT` file.
pub struct WorkflowReporter<W> {
    output_file: Option<PathBuf>,
    out: Mutex<W>,
}

impl WorkflowReporter<std::io::Stdout> {
    pub fn from_env() -> Self {
        let output_file = std::env::var_os("GITHUB_OUTPUT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::new(output_file, std::io::stdout())
    }
}

impl<W: Write> WorkflowReporter<W> {
    pub fn new(output_file: Option<PathBuf>, out: W) -> Self {
        Self {
            output_file,
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn command(&self, line: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{line}");
        }
    }
}

impl<W: Write + Send> Reporter for WorkflowReporter<W> {
    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        let Some(path) = &self.output_file else {
            self.command(&format!(
                "::set-output name={}::{}",
                escape_property(name),
                escape_data(value)
            ));
            return Ok(());
        };

        let delimiter = format!("ghadelimiter_{}", std::process::id());
        if name.contains(&delimiter) || value.contains(&delimiter) {
            bail!("Unexpected input: output '{name}' contains the delimiter {delimiter}");
        }

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open output file {}", path.display()))?;
        writeln!(file, "{name}<<{delimiter}\n{value}\n{delimiter}")
            .with_context(|| format!("Failed to write output file {}", path.display()))?;
        Ok(())
    }

    fn set_failed(&self, message: &str) {
        self.command(&format!("::error::{}", escape_data(message)));
    }

    fn debug(&self, message: &str) {
        self.command(&format!("::debug::{}", escape_data(message)));
    }
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stdout_of(reporter: WorkflowReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn escapes_multiline_messages() {
        assert_eq!(escape_data("50% done\r\nnext"), "50%25 done%0D%0Anext");
        assert_eq!(escape_property("a:b,c"), "a%3Ab%2Cc");
    }

    #[test]
    fn set_failed_emits_error_command() {
        let reporter = WorkflowReporter::new(None, Vec::new());
        reporter.set_failed("Field \"Reactions\" not found in project");
        assert_eq!(
            stdout_of(reporter),
            "::error::Field \"Reactions\" not found in project\n"
        );
    }

    #[test]
    fn debug_emits_debug_command() {
        let reporter = WorkflowReporter::new(None, Vec::new());
        reporter.debug("line one\nline two");
        assert_eq!(stdout_of(reporter), "::debug::line one%0Aline two\n");
    }

    #[test]
    fn set_output_without_file_uses_legacy_command() {
        let reporter = WorkflowReporter::new(None, Vec::new());
        reporter.set_output("status", "success").unwrap();
        assert_eq!(stdout_of(reporter), "::set-output name=status::success\n");
    }

    #[test]
    fn set_output_appends_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_output");
        std::fs::write(&path, "earlier=1\n").unwrap();

        let reporter = WorkflowReporter::new(Some(path.clone()), Vec::new());
        reporter.set_output("status", "success").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let delimiter = format!("ghadelimiter_{}", std::process::id());
        assert_eq!(
            contents,
            format!("earlier=1\nstatus<<{delimiter}\nsuccess\n{delimiter}\n")
        );
        assert!(stdout_of(reporter).is_empty());
    }

    #[test]
    fn set_output_reports_unwritable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("github_output");
        let reporter = WorkflowReporter::new(Some(path), Vec::new());
        let err = reporter.set_output("status", "success").unwrap_err();
        assert!(err.to_string().contains("Failed to open output file"));
    }
}
