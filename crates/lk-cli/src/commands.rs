use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use lk_config::Config;
use lk_diff::{diff_configs, ConfigDiff, DiffLine};
use lk_symbols::SymbolTable;

use crate::cli::*;
use crate::settings::Settings;

/// Run `cli`, writing results to `out` unless the command names an output
/// file. `color` says whether `out` is a terminal.
pub fn run_command(cli: Cli, out: &mut dyn Write, color: bool) -> anyhow::Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let ctx = Ctx {
        format: cli.format,
        color: color && settings.color,
        settings,
    };
    match cli.command {
        Command::Canon(args) => cmd_canon(&ctx, args, out),
        Command::Diff(args) => cmd_diff(&ctx, args, out),
        Command::Apply(args) => cmd_apply(&ctx, args, out),
        Command::Syms(args) => cmd_syms(&ctx, args, out),
    }
}

struct Ctx {
    format: OutputFormat,
    color: bool,
    settings: Settings,
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    Config::open(path).with_context(|| format!("reading config {}", path.display()))
}

/// Send output to `path` if given, else to `out`. Files never get color.
fn emit(
    path: Option<&Path>,
    out: &mut dyn Write,
    color: bool,
    render: impl FnOnce(&mut dyn Write, bool) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut w = BufWriter::new(file);
            render(&mut w, false)?;
            w.flush()
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::debug!(path = %path.display(), "wrote output");
            Ok(())
        }
        None => render(out, color),
    }
}

fn write_config(ctx: &Ctx, cfg: &Config, w: &mut dyn Write) -> anyhow::Result<()> {
    match ctx.format {
        OutputFormat::Text => {
            cfg.write_to(w)?;
        }
        OutputFormat::Json => {
            let sorted: BTreeMap<&str, &str> = cfg.iter().collect();
            serde_json::to_writer_pretty(&mut *w, &sorted)?;
            writeln!(w)?;
        }
    }
    Ok(())
}

fn cmd_canon(ctx: &Ctx, args: CanonArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let cfg = read_config(&args.path)?;
    emit(args.output.as_deref(), out, false, |w, _| write_config(ctx, &cfg, w))
}

fn cmd_diff(ctx: &Ctx, args: DiffArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let old = read_config(&args.old)?;
    let new = read_config(&args.new)?;
    let diff = diff_configs(&old, &new);
    tracing::debug!(
        removed = diff.removals(),
        changed = diff.modifications(),
        added = diff.additions(),
        "computed config diff"
    );
    emit(args.output.as_deref(), out, ctx.color, |w, color| match ctx.format {
        OutputFormat::Text if color => write_colored_diff(&diff, w),
        OutputFormat::Text => {
            diff.write_to(w)?;
            Ok(())
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *w, &diff)?;
            writeln!(w)?;
            Ok(())
        }
    })
}

fn write_colored_diff(diff: &ConfigDiff, w: &mut dyn Write) -> anyhow::Result<()> {
    for line in diff.lines() {
        let text = line.to_string();
        match line {
            DiffLine::Removed(_) => writeln!(w, "{}", text.red())?,
            DiffLine::Changed(_) => writeln!(w, "{}", text.yellow())?,
            DiffLine::Added(_) => writeln!(w, "{}", text.green())?,
        }
    }
    Ok(())
}

fn cmd_apply(ctx: &Ctx, args: ApplyArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let base = read_config(&args.base)?;
    let file = File::open(&args.diff)
        .with_context(|| format!("opening diff {}", args.diff.display()))?;
    let diff = ConfigDiff::parse(BufReader::new(file))
        .with_context(|| format!("reading diff {}", args.diff.display()))?;
    let patched = diff.apply_to(&base).with_context(|| {
        format!(
            "applying {} to {}",
            args.diff.display(),
            args.base.display()
        )
    })?;
    emit(args.output.as_deref(), out, false, |w, _| write_config(ctx, &patched, w))
}

fn cmd_syms(ctx: &Ctx, args: SymsArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let path = args
        .path
        .as_deref()
        .unwrap_or(ctx.settings.kallsyms_path.as_path());
    let table = SymbolTable::open(path)
        .with_context(|| format!("reading symbol table {}", path.display()))?;
    let found = table.find(&args.name);
    if found.is_empty() {
        bail!("no symbol named {:?} in {}", args.name, path.display());
    }
    match ctx.format {
        OutputFormat::Text => {
            for sym in found {
                if ctx.color {
                    writeln!(out, "{}", sym.to_string().cyan())?;
                } else {
                    writeln!(out, "{sym}")?;
                }
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &found)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;

    struct Fixture {
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join("settings.toml"), "color = false\n").unwrap();
            Self { dir }
        }

        fn file(&self, name: &str, contents: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            std::fs::write(&path, contents).unwrap();
            path
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn run(&self, args: &[&str]) -> anyhow::Result<String> {
            let settings = self.path("settings.toml");
            let mut argv = vec!["lkinspect", "--config", settings.to_str().unwrap()];
            argv.extend_from_slice(args);
            let cli = Cli::try_parse_from(argv).unwrap();
            let mut out = Vec::new();
            run_command(cli, &mut out, true)?;
            Ok(String::from_utf8(out).unwrap())
        }
    }

    const OLD: &str = "\
# General setup
CONFIG_FOO=4
CONFIG_FOO2=42
# CONFIG_BAR is not set
CONFIG_X=x
CONFIG_QUUX=23
";

    const NEW: &str = "\
CONFIG_QUUX=23
CONFIG_BAZ=blah
CONFIG_X=z
CONFIG_BAR=y
";

    #[test]
    fn canon_prints_sorted_config() {
        let fx = Fixture::new();
        let cfg = fx.file("old.config", OLD);
        let got = fx.run(&["canon", cfg.to_str().unwrap()]).unwrap();
        assert_eq!(
            got,
            "# CONFIG_BAR is not set\nCONFIG_FOO=4\nCONFIG_FOO2=42\nCONFIG_QUUX=23\nCONFIG_X=x\n"
        );
    }

    #[test]
    fn canon_json() {
        let fx = Fixture::new();
        let cfg = fx.file("c.config", "CONFIG_B=y\nCONFIG_A=m\n");
        let got = fx.run(&["canon", cfg.to_str().unwrap(), "--format", "json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&got).unwrap();
        assert_eq!(value, serde_json::json!({"A": "m", "B": "y"}));
    }

    #[test]
    fn diff_prints_text() {
        let fx = Fixture::new();
        let old = fx.file("old.config", OLD);
        let new = fx.file("new.config", NEW);
        let got = fx
            .run(&["diff", old.to_str().unwrap(), new.to_str().unwrap()])
            .unwrap();
        assert_eq!(got, "-FOO 4\n-FOO2 42\n BAR n -> y\n X x -> z\n+BAZ blah\n");
    }

    #[test]
    fn diff_identical_configs_prints_nothing() {
        let fx = Fixture::new();
        let old = fx.file("old.config", OLD);
        let got = fx
            .run(&["diff", old.to_str().unwrap(), old.to_str().unwrap()])
            .unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn diff_then_apply_reconstructs_new() {
        let fx = Fixture::new();
        let old = fx.file("old.config", OLD);
        let new = fx.file("new.config", NEW);
        let diff = fx.path("changes.diff");
        let patched = fx.path("patched.config");

        let printed = fx
            .run(&[
                "diff",
                old.to_str().unwrap(),
                new.to_str().unwrap(),
                "-o",
                diff.to_str().unwrap(),
            ])
            .unwrap();
        assert!(printed.is_empty());

        fx.run(&[
            "apply",
            old.to_str().unwrap(),
            diff.to_str().unwrap(),
            "-o",
            patched.to_str().unwrap(),
        ])
        .unwrap();

        let want: Config = NEW.parse().unwrap();
        assert_eq!(Config::open(&patched).unwrap(), want);
    }

    #[test]
    fn apply_rejects_inconsistent_diff() {
        let fx = Fixture::new();
        let base = fx.file("base.config", "CONFIG_X=x\n");
        let diff = fx.file("bad.diff", "-T t\n");
        let err = fx
            .run(&["apply", base.to_str().unwrap(), diff.to_str().unwrap()])
            .unwrap_err();
        let cause = err.downcast_ref::<lk_diff::ApplyError>().unwrap();
        assert_eq!(
            cause,
            &lk_diff::ApplyError::InvalidOldValue(lk_diff::ConfigValue::new("T", "t"))
        );
    }

    #[test]
    fn malformed_config_is_reported() {
        let fx = Fixture::new();
        let cfg = fx.file("broken.config", "CONFIG_OK=y\nCONFIG_BROKEN\n");
        let err = fx.run(&["canon", cfg.to_str().unwrap()]).unwrap_err();
        assert!(format!("{err:#}").contains("malformed config line 2"));
    }

    #[test]
    fn syms_finds_all_matches() {
        let fx = Fixture::new();
        let table = fx.file(
            "kallsyms",
            "ffffffff810a1b20 t show_state\nffffffffc0a3d010 t show_state\t[ext4]\nffffffff81000000 T _text\n",
        );
        let got = fx
            .run(&["syms", "show_state", "--path", table.to_str().unwrap()])
            .unwrap();
        assert_eq!(
            got,
            "ffffffff810a1b20 t show_state\nffffffffc0a3d010 t show_state [ext4]\n"
        );
    }

    #[test]
    fn syms_uses_settings_path() {
        let fx = Fixture::new();
        let table = fx.file("System.map", "ffffffff81000000 T _text\n");
        fx.file(
            "settings.toml",
            &format!("color = false\nkallsyms_path = {:?}\n", table.to_str().unwrap()),
        );
        let got = fx.run(&["syms", "_text"]).unwrap();
        assert_eq!(got, "ffffffff81000000 T _text\n");
    }

    #[test]
    fn syms_missing_name_fails() {
        let fx = Fixture::new();
        let table = fx.file("kallsyms", "ffffffff81000000 T _text\n");
        let err = fx
            .run(&["syms", "nope", "--path", table.to_str().unwrap()])
            .unwrap_err();
        assert!(err.to_string().contains("no symbol named \"nope\""));
    }
}
