use anyhow::{Context, Result, bail};
use medreply_config::{Config, ConfigError};
use medreply_engine::{emphasize, rtf, to_markup};
use std::{
    env, fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process,
};

const USAGE: &str = "Usage: medreply [--standalone] [--emphasize] [reply-file]";

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    input: Option<PathBuf>,
    standalone: bool,
    emphasize_only: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut parsed = Args::default();
    for arg in args {
        match arg.as_str() {
            "--standalone" => parsed.standalone = true,
            "--emphasize" => parsed.emphasize_only = true,
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'"),
            path => {
                if parsed.input.is_some() {
                    bail!("more than one reply file given");
                }
                parsed.input = Some(PathBuf::from(path));
            }
        }
    }
    Ok(parsed)
}

fn read_reply(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read reply file '{}'", path.display())),
        None => {
            let mut reply = String::new();
            io::stdin()
                .read_to_string(&mut reply)
                .context("Failed to read reply from stdin")?;
            Ok(reply)
        }
    }
}

fn load_config(config_path: &Path) -> Result<Config, ConfigError> {
    match Config::load_from_path(config_path)? {
        Some(config) => {
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Renders a reply according to the command-line flags and config.
fn render(reply: &str, args: &Args, config: &Config) -> Result<String> {
    if args.emphasize_only {
        return Ok(reply.lines().map(emphasize).collect::<Vec<_>>().join("\n"));
    }

    let markup = if config.wrap_plain_text {
        to_markup(&rtf::ensure_rtf(reply))
    } else {
        to_markup(reply)
    };

    if args.standalone || config.standalone {
        standalone_document(&markup, config)
    } else {
        Ok(markup)
    }
}

fn standalone_document(body: &str, config: &Config) -> Result<String> {
    let style = match &config.stylesheet {
        Some(path) => {
            let css = fs::read_to_string(path)
                .with_context(|| format!("Failed to read stylesheet '{}'", path.display()))?;
            format!("<style>\n{css}\n</style>\n")
        }
        None => String::new(),
    };
    let title = html_escape::encode_text(&config.title);

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n{style}</head>\n<body>\n<article class=\"reply\">\n{body}\n</article>\n</body>\n</html>\n"
    ))
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    let config = match load_config(&Config::config_path()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let reply = read_reply(args.input.as_deref())?;
    let output = render(&reply, &args, &config)?;
    println!("{output}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_flags_and_input() {
        let parsed = args(&["--standalone", "reply.rtf"]).unwrap();
        assert_eq!(
            parsed,
            Args {
                input: Some(PathBuf::from("reply.rtf")),
                standalone: true,
                emphasize_only: false,
            }
        );
        assert_eq!(args(&[]).unwrap(), Args::default());
    }

    #[test]
    fn rejects_unknown_options_and_extra_files() {
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["a.rtf", "b.rtf"]).is_err());
    }

    #[test]
    fn emphasize_only_marks_each_line() {
        let parsed = args(&["--emphasize"]).unwrap();
        let out = render("rest\ncall 911", &parsed, &Config::default()).unwrap();
        assert_eq!(
            out,
            "<span class=\"term-strong\">rest</span>\n<span class=\"term-critical\">call 911</span>"
        );
    }

    #[test]
    fn plain_reply_is_wrapped_before_rendering() {
        let out = render("Steps:\n- rest", &Args::default(), &Config::default()).unwrap();
        assert!(out.starts_with("<h2 class=\"reply-title\">"));
        assert!(out.contains("<div class=\"callout callout-info\">"));
    }

    #[test]
    fn wrapping_can_be_disabled() {
        let config = Config {
            wrap_plain_text: false,
            ..Config::default()
        };
        let out = render("Hello", &Args::default(), &config).unwrap();
        assert_eq!(out, "<p>Hello</p>");
    }

    #[test]
    fn standalone_document_inlines_stylesheet() {
        let temp_dir = TempDir::new().unwrap();
        let css = temp_dir.path().join("reply.css");
        fs::write(&css, ".callout { border: 1px solid; }").unwrap();
        let config = Config {
            standalone: true,
            stylesheet: Some(css),
            wrap_plain_text: false,
            title: "A & B".to_string(),
        };

        let out = render("Hello", &Args::default(), &config).unwrap();

        assert!(out.starts_with("<!DOCTYPE html>"));
        assert!(out.contains("<title>A &amp; B</title>"));
        assert!(out.contains(".callout { border: 1px solid; }"));
        assert!(out.contains("<article class=\"reply\">\n<p>Hello</p>\n</article>"));
    }

    #[test]
    fn missing_stylesheet_is_an_error() {
        let config = Config {
            standalone: true,
            stylesheet: Some(PathBuf::from("/nonexistent/reply.css")),
            ..Config::default()
        };
        assert!(render("Hello", &Args::default(), &config).is_err());
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn config_file_is_loaded_and_parse_errors_surface() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        fs::write(&path, "standalone = true\ntitle = \"Triage\"").unwrap();
        let config = load_config(&path).unwrap();
        assert!(config.standalone);
        assert_eq!(config.title, "Triage");

        fs::write(&path, "standalone = 3").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn reads_reply_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reply.txt");
        fs::write(&path, "1. Rest").unwrap();

        assert_eq!(read_reply(Some(&path)).unwrap(), "1. Rest");
        assert!(read_reply(Some(&temp_dir.path().join("missing.txt"))).is_err());
    }
}
