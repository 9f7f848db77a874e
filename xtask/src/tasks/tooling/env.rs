use anyhow::Result;

use crate::cli::Shell;
use crate::identity::BuildIdentity;

pub fn run(shell: Shell) -> Result<()> {
    let identity = BuildIdentity::from_env();
    print!("{}", render(&identity, shell));
    Ok(())
}

// Plain string exports so callers can `eval` them. Values are single-quoted so
// nothing in a build number is expanded or executed by the shell.
fn render(identity: &BuildIdentity, shell: Shell) -> String {
    let mut out = String::new();
    for (name, value) in identity.vars() {
        let value = value.to_string_lossy();
        let line = match shell {
            Shell::Bash | Shell::Sh => format!("export {name}={}\n", sh_quote(&value)),
            Shell::Powershell => format!("$env:{name} = {}\n", powershell_quote(&value)),
        };
        out.push_str(&line);
    }
    out
}

/// `'...'` with each embedded `'` closed, escaped and reopened: `'\''`.
fn sh_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// PowerShell verbatim string. It also treats the typographic single quotes
/// as delimiters, so those are doubled too.
fn powershell_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        if matches!(c, '\'' | '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}') {
            out.push(c);
        }
        out.push(c);
    }
    out.push('\'');
    out
}
