//! Account database lookups through `getent`.

use std::path::PathBuf;

use crate::shell::{CommandRunner, CommandSpec};

/// The fields rigup reads from a passwd record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswdEntry {
    pub name: String,
    pub home: PathBuf,
    pub shell: PathBuf,
}

impl PasswdEntry {
    /// Parse one `name:pw:uid:gid:gecos:home:shell` line.
    pub fn parse(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.trim_end().split(':').collect();
        if fields.len() < 7 || fields[0].is_empty() {
            return None;
        }
        Some(Self {
            name: fields[0].to_string(),
            home: PathBuf::from(fields[5]),
            shell: PathBuf::from(fields[6]),
        })
    }
}

/// Look up `user` with `getent passwd`.
pub fn lookup(runner: &dyn CommandRunner, user: &str) -> Option<PasswdEntry> {
    let result = runner
        .run(&CommandSpec::new("getent").args(["passwd", user]))
        .ok()?;
    if !result.success {
        return None;
    }
    result.stdout.lines().next().and_then(PasswdEntry::parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{MockOutcome, MockRunner};

    #[test]
    fn parses_record() {
        let entry = PasswdEntry::parse("dev:x:1000:1000:Dev,,,:/home/dev:/bin/bash\n").unwrap();
        assert_eq!(entry.name, "dev");
        assert_eq!(entry.home, PathBuf::from("/home/dev"));
        assert_eq!(entry.shell, PathBuf::from("/bin/bash"));
    }

    #[test]
    fn rejects_short_record() {
        assert!(PasswdEntry::parse("dev:x:1000").is_none());
        assert!(PasswdEntry::parse("").is_none());
    }

    #[test]
    fn lookup_uses_getent() {
        let runner = MockRunner::new().on(
            "getent passwd dev",
            MockOutcome::Success("dev:x:1000:1000::/home/dev:/usr/bin/zsh\n".into()),
        );
        let entry = lookup(&runner, "dev").unwrap();
        assert_eq!(entry.shell, PathBuf::from("/usr/bin/zsh"));
    }

    #[test]
    fn lookup_miss_is_none() {
        let runner = MockRunner::new().on("getent", MockOutcome::Fail(2));
        assert!(lookup(&runner, "ghost").is_none());
    }
}
