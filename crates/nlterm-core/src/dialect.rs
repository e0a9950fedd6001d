//! Shell dialect configuration.
//!
//! One session engine serves three host shells. Everything that differs
//! between them - prompt separator, known command names, metacharacters,
//! flag marker style, how the shell is spawned - lives here as per-dialect
//! constants, so the classifier and executor stay dialect-agnostic.

use serde::{Deserialize, Serialize};

/// The host shell a session targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Bash,
    Cmd,
    PowerShell,
}

impl Default for Dialect {
    fn default() -> Self {
        if cfg!(windows) {
            Dialect::Cmd
        } else {
            Dialect::Bash
        }
    }
}

/// Command names the classifier treats as direct input for the bash dialect.
const BASH_COMMANDS: &[&str] = &[
    "cd", "ls", "mkdir", "rmdir", "rm", "cp", "mv", "grep", "cat", "echo", "pwd", "sudo", "apt",
    "git", "touch", "chmod", "chown", "man", "find", "ps", "kill", "top", "df", "du", "zip",
    "unzip", "tar", "ssh", "scp", "ping", "ifconfig", "ip", "curl", "wget", "history", "nano",
    "vim", "vi", "less", "more", "tail", "head", "sort", "sed", "awk", "cut", "tr", "wc", "who",
    "w", "whoami", "date", "cal", "clear", "cls", "exit", "quit", "reboot", "shutdown", "uname",
    "which", "whereis", "locate", "ln", "mount", "umount", "free", "netstat", "traceroute",
    "source", "xargs", "env", "export", "chroot", "fg", "bg",
];

/// Command names the classifier treats as direct input for the CMD dialect.
const CMD_COMMANDS: &[&str] = &[
    "cd", "dir", "mkdir", "rmdir", "del", "copy", "move", "find", "echo", "type", "cmd", "exit",
    "cls", "attrib", "ren", "md", "rd", "xcopy", "more", "help", "systeminfo", "ipconfig", "ping",
    "tracert", "netstat", "net", "tasklist", "taskkill", "time", "date", "chdir", "pushd", "popd",
    "where", "fc", "comp", "shutdown", "set", "start", "assoc", "ftype", "title", "tree", "prompt",
    "path", "for", "call", "if", "ver", "vol", "label", "chkdsk", "diskpart", "sfc", "cipher",
    "powershell", "whoami", "color", "robocopy", "forfiles", "sort", "findstr",
];

/// Common PowerShell aliases accepted as direct input.
const POWERSHELL_COMMANDS: &[&str] = &[
    "cd", "ls", "dir", "cat", "pwd", "echo", "cls", "clear", "exit", "quit", "gci", "gc", "sl",
    "copy", "move", "del", "type", "where", "sort", "select", "measure", "foreach",
];

/// Cmdlet verb prefixes that mark a line as PowerShell.
const POWERSHELL_VERB_PREFIXES: &[&str] = &[
    "Get-", "Set-", "New-", "Remove-", "Start-", "Stop-", "Restart-", "Test-", "Invoke-", "Select-",
    "Where-", "ForEach-", "Out-", "Write-", "Read-", "Import-", "Export-", "Copy-", "Move-",
];

impl Dialect {
    /// Returns the config/CLI identifier for this dialect.
    pub fn id(self) -> &'static str {
        match self {
            Dialect::Bash => "bash",
            Dialect::Cmd => "cmd",
            Dialect::PowerShell => "powershell",
        }
    }

    /// Returns the `Dialect` for a given id string.
    pub fn from_id(id: &str) -> Option<Dialect> {
        match id.to_lowercase().as_str() {
            "bash" | "sh" => Some(Dialect::Bash),
            "cmd" => Some(Dialect::Cmd),
            "powershell" | "pwsh" => Some(Dialect::PowerShell),
            _ => None,
        }
    }

    /// Human-readable shell name, used in prompts sent to the provider.
    pub fn shell_name(self) -> &'static str {
        match self {
            Dialect::Bash => "bash",
            Dialect::Cmd => "Windows CMD",
            Dialect::PowerShell => "PowerShell",
        }
    }

    /// Separator drawn between the working directory and the input region.
    pub fn prompt_separator(self) -> char {
        match self {
            Dialect::Bash => '$',
            Dialect::Cmd | Dialect::PowerShell => '>',
        }
    }

    /// Program and flag used to hand a command line to the host shell.
    pub fn shell_invocation(self) -> (&'static str, &'static str) {
        match self {
            Dialect::Bash => ("sh", "-c"),
            Dialect::Cmd => ("cmd", "/C"),
            Dialect::PowerShell => ("powershell", "-Command"),
        }
    }

    /// Command names recognized as direct input when they lead the line.
    pub fn known_commands(self) -> &'static [&'static str] {
        match self {
            Dialect::Bash => BASH_COMMANDS,
            Dialect::Cmd => CMD_COMMANDS,
            Dialect::PowerShell => POWERSHELL_COMMANDS,
        }
    }

    /// Leading-token prefixes recognized as direct input (cmdlet verbs).
    pub fn command_prefixes(self) -> &'static [&'static str] {
        match self {
            Dialect::Bash | Dialect::Cmd => &[],
            Dialect::PowerShell => POWERSHELL_VERB_PREFIXES,
        }
    }

    /// Shell metacharacters whose presence marks a line as direct input.
    pub fn metacharacters(self) -> &'static [char] {
        match self {
            Dialect::Bash => &['|', ';', '>', '<', '&'],
            Dialect::Cmd => &['|', '&', '>', '<'],
            Dialect::PowerShell => &['|', ';', '>', '<'],
        }
    }

    /// Option flag markers for this dialect.
    pub fn flag_markers(self) -> &'static [&'static str] {
        match self {
            Dialect::Bash => &["--", "-"],
            Dialect::Cmd => &["/", "-"],
            Dialect::PowerShell => &["-"],
        }
    }

    /// Whole-line shorthand tokens that always run as-is.
    pub fn shorthand_tokens(self) -> &'static [&'static str] {
        match self {
            Dialect::Bash => &["..", ".", "!!", "!$"],
            Dialect::Cmd | Dialect::PowerShell => &[".."],
        }
    }

    /// Path separator characters for this dialect.
    pub fn path_separators(self) -> &'static [char] {
        match self {
            Dialect::Bash => &['/'],
            Dialect::Cmd | Dialect::PowerShell => &['\\', '/'],
        }
    }

    /// Error message for a failed directory change, in the shell's own words.
    pub fn cd_error(self, target: &str) -> String {
        match self {
            Dialect::Bash => format!("bash: cd: {target}: No such file or directory"),
            Dialect::Cmd => format!("The system cannot find the path specified: {target}"),
            Dialect::PowerShell => {
                format!("Set-Location : Cannot find path '{target}' because it does not exist.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id_round_trips() {
        for dialect in [Dialect::Bash, Dialect::Cmd, Dialect::PowerShell] {
            assert_eq!(Dialect::from_id(dialect.id()), Some(dialect));
        }
        assert_eq!(Dialect::from_id("fish"), None);
    }

    #[test]
    fn test_prompt_separator() {
        assert_eq!(Dialect::Bash.prompt_separator(), '$');
        assert_eq!(Dialect::Cmd.prompt_separator(), '>');
        assert_eq!(Dialect::PowerShell.prompt_separator(), '>');
    }

    #[test]
    fn test_serde_id_matches() {
        let dialect: Dialect = serde_json::from_str("\"powershell\"").unwrap();
        assert_eq!(dialect, Dialect::PowerShell);
        assert_eq!(serde_json::to_string(&Dialect::Bash).unwrap(), "\"bash\"");
    }
}
