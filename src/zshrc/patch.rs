//! Pure text transformation of a zsh startup file.
//!
//! [`patch`] rewrites the plugin declaration and the rigup settings block and
//! leaves every other line untouched. It is idempotent:
//! `patch(patch(x)) == patch(x)`, which is how the editor detects an
//! already-applied file.

/// First line of the settings block.
pub const BLOCK_BEGIN: &str = "# >>> rigup settings >>>";

/// Last line of the settings block.
pub const BLOCK_END: &str = "# <<< rigup settings <<<";

const DECLARATION_PREFIX: &str = "plugins=(";

/// Settings written when the config file does not override them.
pub fn default_settings() -> Vec<String> {
    [
        "HISTSIZE=10000",
        "SAVEHIST=10000",
        "setopt HIST_IGNORE_ALL_DUPS",
        "setopt SHARE_HISTORY",
        "export ZSH_AUTOSUGGEST_HIGHLIGHT_STYLE=\"fg=8\"",
        "[ -d \"$HOME/.cargo/bin\" ] && export PATH=\"$HOME/.cargo/bin:$PATH\"",
        "export NVM_DIR=\"$HOME/.nvm\"",
        "[ -s \"$NVM_DIR/nvm.sh\" ] && . \"$NVM_DIR/nvm.sh\"",
        "export PYENV_ROOT=\"$HOME/.pyenv\"",
        "[ -d \"$PYENV_ROOT/bin\" ] && export PATH=\"$PYENV_ROOT/bin:$PATH\"",
        "command -v pyenv >/dev/null && eval \"$(pyenv init -)\"",
        "[ -s \"$HOME/.sdkman/bin/sdkman-init.sh\" ] && . \"$HOME/.sdkman/bin/sdkman-init.sh\"",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// The single plugin declaration rigup writes.
pub fn canonical_plugin_line(plugins: &[&str]) -> String {
    format!("{}{})", DECLARATION_PREFIX, plugins.join(" "))
}

/// Whether a line opens an active (uncommented) plugin declaration.
pub fn is_declaration(line: &str) -> bool {
    line.trim_start().starts_with(DECLARATION_PREFIX)
}

/// Number of active plugin declarations.
pub fn count_declarations(content: &str) -> usize {
    content.lines().filter(|l| is_declaration(l)).count()
}

/// Whether the oh-my-zsh loader is sourced on this line.
fn is_framework_source(line: &str) -> bool {
    let t = line.trim_start();
    (t.starts_with("source ") || t.starts_with(". ")) && t.contains("oh-my-zsh.sh")
}

/// Rewrite `content` so it has exactly one declaration equal to
/// `plugin_line` and exactly one settings block holding `settings`.
///
/// Kept lines retain their own terminators. Lines rigup writes use CRLF
/// when the file already does and LF otherwise. A begin marker with no
/// end marker after it is dropped on its own.
pub fn patch(content: &str, plugin_line: &str, settings: &[String]) -> String {
    let eol = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len() + settings.len() + 4);
    let mut declared = false;
    let mut block_written = false;
    let mut i = 0;

    while i < lines.len() {
        let raw = lines[i];
        let line = strip_eol(raw);

        if is_declaration(line) {
            let end = declaration_end(&lines, i);
            if !declared {
                let indent = &line[..line.len() - line.trim_start().len()];
                out.push(format!("{}{}{}", indent, plugin_line, eol));
                declared = true;
            }
            i = end + 1;
            continue;
        }

        if line.trim() == BLOCK_BEGIN {
            let close = lines[i + 1..]
                .iter()
                .position(|l| l.trim() == BLOCK_END)
                .map(|off| i + 1 + off);
            if let Some(end) = close {
                if !block_written {
                    push_block(&mut out, settings, eol);
                    block_written = true;
                }
                i = end + 1;
            } else {
                i += 1;
            }
            continue;
        }

        if !declared && is_framework_source(line) {
            out.push(format!("{}{}", plugin_line, eol));
            declared = true;
        }

        if raw.ends_with('\n') {
            out.push(raw.to_string());
        } else {
            out.push(format!("{}{}", raw, eol));
        }
        i += 1;
    }

    if !declared {
        out.push(format!("{}{}", plugin_line, eol));
    }

    if !block_written {
        if out.last().is_some_and(|l| !l.trim().is_empty()) {
            out.push(eol.to_string());
        }
        push_block(&mut out, settings, eol);
    }

    out.concat()
}

fn strip_eol(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Index of the line that closes the declaration opened at `start`.
fn declaration_end(lines: &[&str], start: usize) -> usize {
    let opener = &lines[start].trim_start()[DECLARATION_PREFIX.len()..];
    if opener.contains(')') {
        return start;
    }
    lines[start + 1..]
        .iter()
        .position(|l| l.contains(')'))
        .map(|off| start + 1 + off)
        .unwrap_or(start)
}

fn push_block(out: &mut Vec<String>, settings: &[String], eol: &str) {
    out.push(format!("{}{}", BLOCK_BEGIN, eol));
    out.extend(settings.iter().map(|s| format!("{}{}", s, eol)));
    out.push(format!("{}{}", BLOCK_END, eol));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Vec<String> {
        vec!["HISTSIZE=10000".to_string()]
    }

    fn line() -> String {
        canonical_plugin_line(&["git", "zsh-autosuggestions"])
    }

    #[test]
    fn canonical_line_format() {
        assert_eq!(line(), "plugins=(git zsh-autosuggestions)");
    }

    #[test]
    fn replaces_single_line_declaration() {
        let input = "export ZSH=\"$HOME/.oh-my-zsh\"\nplugins=(git)\nsource $ZSH/oh-my-zsh.sh\n";
        let out = patch(input, &line(), &settings());

        assert!(out.contains("plugins=(git zsh-autosuggestions)\nsource $ZSH/oh-my-zsh.sh"));
        assert_eq!(count_declarations(&out), 1);
        assert!(out.starts_with("export ZSH=\"$HOME/.oh-my-zsh\"\n"));
    }

    #[test]
    fn replaces_multi_line_declaration() {
        let input = "plugins=(\n  git\n  docker\n)\nalias ll='ls -l'\n";
        let out = patch(input, &line(), &settings());

        assert!(!out.contains("docker"));
        assert!(out.starts_with("plugins=(git zsh-autosuggestions)\nalias ll='ls -l'\n"));
    }

    #[test]
    fn drops_extra_declarations() {
        let input = "plugins=(git)\necho hi\nplugins=(docker)\n";
        let out = patch(input, &line(), &settings());
        assert_eq!(count_declarations(&out), 1);
        assert!(out.contains("echo hi"));
    }

    #[test]
    fn commented_declarations_are_kept() {
        let input = "# plugins=(rails)\nplugins=(git)\n";
        let out = patch(input, &line(), &settings());
        assert!(out.contains("# plugins=(rails)"));
        assert_eq!(count_declarations(&out), 1);
    }

    #[test]
    fn missing_declaration_goes_before_framework_source() {
        let input = "export ZSH=~/.oh-my-zsh\nsource $ZSH/oh-my-zsh.sh\nalias g=git\n";
        let out = patch(input, &line(), &settings());
        assert!(out.contains("plugins=(git zsh-autosuggestions)\nsource $ZSH/oh-my-zsh.sh"));
    }

    #[test]
    fn missing_declaration_is_appended() {
        let input = "alias g=git\n";
        let out = patch(input, &line(), &settings());
        assert!(out.starts_with("alias g=git\nplugins=(git zsh-autosuggestions)\n"));
    }

    #[test]
    fn block_is_appended_once() {
        let once = patch("alias g=git\n", &line(), &settings());
        let twice = patch(&once, &line(), &settings());

        assert_eq!(once, twice);
        assert_eq!(once.matches(BLOCK_BEGIN).count(), 1);
        assert!(once.ends_with(&format!("{}\nHISTSIZE=10000\n{}\n", BLOCK_BEGIN, BLOCK_END)));
    }

    #[test]
    fn existing_block_is_refreshed_in_place() {
        let input = format!("{}\nOLD=1\n{}\nalias after=1\n", BLOCK_BEGIN, BLOCK_END);
        let out = patch(&input, &line(), &settings());

        assert!(!out.contains("OLD=1"));
        assert!(out.contains("HISTSIZE=10000"));
        assert!(out.contains(&format!("{}\nalias after=1", BLOCK_END)));
    }

    #[test]
    fn unrelated_lines_preserved_verbatim() {
        let input = "  export EDITOR=vim  \n\n# comment\nplugins=(git)\n";
        let out = patch(input, &line(), &settings());
        assert!(out.starts_with("  export EDITOR=vim  \n\n# comment\n"));
    }

    #[test]
    fn patch_is_idempotent_for_default_settings() {
        let input = "plugins=(git)\nsource $ZSH/oh-my-zsh.sh\n";
        let once = patch(input, &line(), &default_settings());
        assert_eq!(patch(&once, &line(), &default_settings()), once);
    }

    #[test]
    fn unterminated_block_keeps_following_lines() {
        let input = format!(
            "{}\nHISTSIZE=1\nalias keepme=1\nexport IMPORTANT=1\n",
            BLOCK_BEGIN
        );
        let out = patch(&input, "plugins=(git)", &settings());

        assert!(out.contains("HISTSIZE=1\n"));
        assert!(out.contains("alias keepme=1\n"));
        assert!(out.contains("export IMPORTANT=1\n"));
        assert_eq!(out.matches(BLOCK_BEGIN).count(), 1);
        assert!(out.ends_with(&format!("{}\nHISTSIZE=10000\n{}\n", BLOCK_BEGIN, BLOCK_END)));
        assert_eq!(patch(&out, "plugins=(git)", &settings()), out);
    }

    #[test]
    fn crlf_line_endings_are_kept() {
        let input = "export EDITOR=vim\r\nplugins=(git)\r\nalias g=git\r\n";
        let out = patch(input, &line(), &settings());

        assert!(out.starts_with("export EDITOR=vim\r\nplugins=(git zsh-autosuggestions)\r\n"));
        assert!(out.contains("alias g=git\r\n"));
        assert!(!out.replace("\r\n", "").contains('\n'));
        assert_eq!(patch(&out, &line(), &settings()), out);
    }

    #[test]
    fn missing_final_newline_is_added() {
        let out = patch("alias g=git", &line(), &settings());
        assert!(out.starts_with("alias g=git\nplugins=("));
    }
}
