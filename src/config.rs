use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use clap::{Parser, ValueEnum, error::ErrorKind};

/// `EX_CONFIG` from sysexits.
pub const EX_CONFIG: u8 = 78;

/// Command line configuration of the server.
#[derive(Parser, Debug, Clone)]
#[command(name = "tbserve", version, about = "Syzygy tablebase server", long_about = None)]
pub struct Config {
    /// Port to listen on
    #[arg(short, long, default_value_t = 5000, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub bind: IpAddr,

    /// Directory with syzygy tables, may be repeated
    #[arg(short, long = "syzygy", value_name = "DIR")]
    pub syzygy: Vec<PathBuf>,

    /// Rules of the tables
    #[arg(long, value_enum, default_value_t = Variant::Chess)]
    pub variant: Variant,

    /// Allow cross-origin requests from anywhere
    #[arg(long)]
    pub cors: bool,

    /// Log every probed position
    #[arg(long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Chess,
    #[cfg(feature = "variant")]
    Atomic,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Exit status for a command line that did not parse. Help and version
/// requests are not failures.
pub fn exit_code_for(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => EX_CONFIG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["tbserve", "--syzygy", "/tables"]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.addr(), "127.0.0.1:5000".parse().unwrap());
        assert_eq!(config.syzygy, [PathBuf::from("/tables")]);
        assert_eq!(config.variant, Variant::Chess);
        assert!(!config.cors);
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_repeated_directories_and_flags() {
        let config = Config::try_parse_from([
            "tbserve", "-s", "/a", "--syzygy", "/b", "-p", "9000", "--cors", "--verbose",
        ])
        .unwrap();
        assert_eq!(config.syzygy, [PathBuf::from("/a"), PathBuf::from("/b")]);
        assert_eq!(config.port, 9000);
        assert!(config.cors);
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Config::try_parse_from(["tbserve", "--port", "0"]).is_err());
        assert!(Config::try_parse_from(["tbserve", "--port", "http"]).is_err());
        assert!(Config::try_parse_from(["tbserve", "--variant", "crazyhouse"]).is_err());
        assert!(Config::try_parse_from(["tbserve", "stray"]).is_err());
    }

    #[test]
    fn test_exit_codes() {
        let code = |args: &[&str]| exit_code_for(&Config::try_parse_from(args).unwrap_err());
        assert_eq!(code(&["tbserve", "--port", "0"]), EX_CONFIG);
        assert_eq!(code(&["tbserve", "--unknown"]), EX_CONFIG);
        assert_eq!(code(&["tbserve", "-s", "/tmp", "stray"]), EX_CONFIG);
        assert_eq!(code(&["tbserve", "--help"]), 0);
        assert_eq!(code(&["tbserve", "--version"]), 0);
    }

    #[cfg(feature = "variant")]
    #[test]
    fn test_atomic_variant() {
        let config = Config::try_parse_from(["tbserve", "--variant", "atomic"]).unwrap();
        assert_eq!(config.variant, Variant::Atomic);
    }
}
