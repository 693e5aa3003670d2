//! Typed command model
//!
//! A command line is parsed exactly once into a `Command`. Handlers match on
//! the variants instead of re-tokenising text. Parsing never fails: lines
//! that do not fit a known sub-form become the namespace's invalid variant,
//! so each handler can still answer with its own error text.

use std::fmt;

/// Suffix marking a package that comes from the AUR.
pub const AUR_SUFFIX: &str = "-bin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pacman(PacmanOp),
    Paru(ParuOp),
    Systemctl(SystemctlOp),
    Ip(IpOp),
    /// `launch <pkg>`
    Launch(String),
    /// Nothing matched. Holds the trimmed input.
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacmanOp {
    /// `-Qq`
    QueryInstalled,
    /// `-S <pkg>...`
    Install(Vec<String>),
    /// `-R <pkg>...`
    Remove(Vec<String>),
    /// `-Syu`
    SysUpgrade,
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParuOp {
    QueryInstalled,
    Install(Vec<String>),
    Remove(Vec<String>),
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemctlOp {
    /// `--user status <unit>`
    UserStatus(String),
    /// `restart <unit>`
    Restart(String),
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpOp {
    Link,
    Unknown(String),
}

/// Which package tool handles a given package name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installer {
    Pacman,
    Paru,
}

impl Installer {
    pub fn for_package(package: &str) -> Self {
        if package.ends_with(AUR_SUFFIX) {
            Installer::Paru
        } else {
            Installer::Pacman
        }
    }
}

impl Command {
    /// Parse one command line. Prefixes are checked in fixed priority
    /// order: pacman, paru, systemctl, ip, launch.
    pub fn parse(input: &str) -> Self {
        let line = input.trim();
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if line.starts_with("pacman") {
            Command::Pacman(parse_pacman(line, &tokens))
        } else if line.starts_with("paru") {
            Command::Paru(parse_paru(line, &tokens))
        } else if line.starts_with("systemctl") {
            Command::Systemctl(parse_systemctl(line, &tokens))
        } else if line.starts_with("ip") {
            Command::Ip(parse_ip(line, &tokens))
        } else if let Some(rest) = line.strip_prefix("launch ") {
            Command::Launch(rest.trim().to_string())
        } else {
            Command::Unknown(line.to_string())
        }
    }

    /// Install command for `package`, routed by the `-bin` suffix rule.
    pub fn install(package: &str) -> Self {
        let targets = split_targets(package);
        match Installer::for_package(package) {
            Installer::Pacman => Command::Pacman(PacmanOp::Install(targets)),
            Installer::Paru => Command::Paru(ParuOp::Install(targets)),
        }
    }

    /// Remove command for `package`, routed by the `-bin` suffix rule.
    pub fn remove(package: &str) -> Self {
        let targets = split_targets(package);
        match Installer::for_package(package) {
            Installer::Pacman => Command::Pacman(PacmanOp::Remove(targets)),
            Installer::Paru => Command::Paru(ParuOp::Remove(targets)),
        }
    }

    pub fn launch(package: &str) -> Self {
        Command::Launch(package.trim().to_string())
    }
}

fn split_targets(package: &str) -> Vec<String> {
    package.split_whitespace().map(str::to_string).collect()
}

fn targets(rest: &[&str]) -> Vec<String> {
    rest.iter().map(|t| t.to_string()).collect()
}

fn parse_pacman(line: &str, tokens: &[&str]) -> PacmanOp {
    match tokens {
        ["pacman", "-Qq"] => PacmanOp::QueryInstalled,
        ["pacman", "-Syu"] => PacmanOp::SysUpgrade,
        ["pacman", "-S", rest @ ..] if !rest.is_empty() => PacmanOp::Install(targets(rest)),
        ["pacman", "-R", rest @ ..] if !rest.is_empty() => PacmanOp::Remove(targets(rest)),
        _ => PacmanOp::Invalid(line.to_string()),
    }
}

fn parse_paru(line: &str, tokens: &[&str]) -> ParuOp {
    match tokens {
        ["paru", "-Qq"] => ParuOp::QueryInstalled,
        ["paru", "-S", rest @ ..] if !rest.is_empty() => ParuOp::Install(targets(rest)),
        ["paru", "-R", rest @ ..] if !rest.is_empty() => ParuOp::Remove(targets(rest)),
        _ => ParuOp::Invalid(line.to_string()),
    }
}

fn parse_systemctl(line: &str, tokens: &[&str]) -> SystemctlOp {
    match tokens {
        ["systemctl", "--user", "status", unit] => SystemctlOp::UserStatus(unit_name(unit)),
        ["systemctl", "restart", unit] => SystemctlOp::Restart(unit_name(unit)),
        _ => SystemctlOp::Unknown(line.to_string()),
    }
}

fn parse_ip(line: &str, tokens: &[&str]) -> IpOp {
    match tokens {
        ["ip", "link"] => IpOp::Link,
        _ => IpOp::Unknown(line.to_string()),
    }
}

/// `pipewire.service` and `pipewire` name the same unit.
fn unit_name(raw: &str) -> String {
    raw.strip_suffix(".service").unwrap_or(raw).to_string()
}

impl SystemctlOp {
    /// Unit the operation targets, if it parsed into a known form.
    pub fn unit(&self) -> Option<&str> {
        match self {
            SystemctlOp::UserStatus(unit) | SystemctlOp::Restart(unit) => Some(unit.as_str()),
            SystemctlOp::Unknown(_) => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Pacman(op) => match op {
                PacmanOp::QueryInstalled => write!(f, "pacman -Qq"),
                PacmanOp::Install(pkgs) => write!(f, "pacman -S {}", pkgs.join(" ")),
                PacmanOp::Remove(pkgs) => write!(f, "pacman -R {}", pkgs.join(" ")),
                PacmanOp::SysUpgrade => write!(f, "pacman -Syu"),
                PacmanOp::Invalid(raw) => f.write_str(raw),
            },
            Command::Paru(op) => match op {
                ParuOp::QueryInstalled => write!(f, "paru -Qq"),
                ParuOp::Install(pkgs) => write!(f, "paru -S {}", pkgs.join(" ")),
                ParuOp::Remove(pkgs) => write!(f, "paru -R {}", pkgs.join(" ")),
                ParuOp::Invalid(raw) => f.write_str(raw),
            },
            Command::Systemctl(op) => match op {
                SystemctlOp::UserStatus(unit) => write!(f, "systemctl --user status {}", unit),
                SystemctlOp::Restart(unit) => write!(f, "systemctl restart {}", unit),
                SystemctlOp::Unknown(raw) => f.write_str(raw),
            },
            Command::Ip(op) => match op {
                IpOp::Link => write!(f, "ip link"),
                IpOp::Unknown(raw) => f.write_str(raw),
            },
            Command::Launch(pkg) => write!(f, "launch {}", pkg),
            Command::Unknown(raw) => f.write_str(raw),
        }
    }
}
