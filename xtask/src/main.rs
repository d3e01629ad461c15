use std::error::Error;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use duct::cmd;

type TaskResult = Result<(), Box<dyn Error>>;

/// One cargo invocation; `None` entries are dropped, so optional flags can
/// sit inline.
type Invocation = Vec<Option<String>>;

const LIBRARY: &str = "swatchbook";
const CLI: &str = "swatchbook-cli";

/// CLI runs that exercise every subcommand against the built-in catalogs.
const SMOKE_RUNS: &[&[&str]] = &[
    &["catalogs"],
    &["--catalog", "base", "show"],
    &["next", "--count", "12"],
    &["--catalog", "base", "distinct", "4"],
    &["--catalog", "base", "distinct", "20"],
    &["interpolate", "5", "hsl(0, 50%, 50%)", "hsl(120, 50%, 50%)"],
    &["tone", "hsl(209, 23%, 32%)"],
    &["lighten", "hsl(209, 23%, 32%)"],
    &["darken", "--amount", "0.5", "hsl(44, 84%, 83%)"],
    &["--json", "named"],
];

fn cli() -> Command {
    Command::new("swatchbook-task")
        .about("Development tasks for the swatchbook workspace")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("lint")
                .about("Check formatting and run clippy")
                .arg(flag("fix", "Rewrite formatting instead of checking it")),
        )
        .subcommand(
            Command::new("test")
                .about("Run the test suites")
                .arg(flag("lib", "Only test the swatchbook library"))
                .arg(Arg::new("filter").help("Only run tests whose name contains FILTER")),
        )
        .subcommand(
            Command::new("bench")
                .about("Run the selection benchmarks")
                .arg(Arg::new("filter").help("Only run benchmarks matching FILTER")),
        )
        .subcommand(Command::new("smoke").about("Run the swatchbook binary against the built-ins"))
        .subcommand(Command::new("all").about("Lint, test and smoke-run, reporting every failure"))
}

fn flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).action(ArgAction::SetTrue).help(help)
}

fn main() {
    if let Err(error) = run() {
        eprintln!("xtask error: {error}");
        process::exit(1);
    }
}

fn run() -> TaskResult {
    let matches = cli().get_matches();

    let plan = match matches.subcommand() {
        Some(("lint", args)) => lint_plan(args.get_flag("fix")),
        Some(("test", args)) => test_plan(args.get_flag("lib"), filter(args)),
        Some(("bench", args)) => bench_plan(filter(args)),
        Some(("smoke", _)) => smoke_plan(),
        Some(("all", _)) => return run_all(),
        _ => unreachable!(),
    };

    execute(&plan)
}

fn filter(args: &ArgMatches) -> Option<String> {
    args.get_one::<String>("filter").cloned()
}

fn arg(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn lint_plan(fix: bool) -> Vec<Invocation> {
    let fmt_check = (!fix).then(|| ["--", "--check"]).into_iter().flatten();
    vec![
        [arg("fmt"), arg("--all")]
            .into_iter()
            .chain(fmt_check.map(arg))
            .collect(),
        ["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]
            .into_iter()
            .map(arg)
            .collect(),
    ]
}

fn test_plan(library_only: bool, filter: Option<String>) -> Vec<Invocation> {
    let scope = if library_only {
        [arg("-p"), arg(LIBRARY)]
    } else {
        [arg("--workspace"), None]
    };
    vec![[arg("test")].into_iter().chain(scope).chain([filter]).collect()]
}

fn bench_plan(filter: Option<String>) -> Vec<Invocation> {
    vec![vec![arg("bench"), arg("-p"), arg(LIBRARY), filter]]
}

fn smoke_plan() -> Vec<Invocation> {
    SMOKE_RUNS
        .iter()
        .map(|run| {
            ["run", "--quiet", "-p", CLI, "--"]
                .iter()
                .chain(run.iter())
                .map(|value| arg(value))
                .collect()
        })
        .collect()
}

fn run_all() -> TaskResult {
    let stages = [
        ("lint", lint_plan(false)),
        ("tests", test_plan(false, None)),
        ("smoke", smoke_plan()),
    ];

    let failures: Vec<String> = stages
        .iter()
        .filter_map(|(label, plan)| {
            execute(plan).err().map(|error| {
                eprintln!("{label} failed: {error}");
                format!("{label}: {error}")
            })
        })
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} stage(s) failed:\n{}", failures.len(), failures.join("\n")).into())
    }
}

fn execute(plan: &[Invocation]) -> TaskResult {
    for invocation in plan {
        let args: Vec<&str> = invocation.iter().flatten().map(String::as_str).collect();
        println!("> cargo {}", args.join(" "));
        cmd("cargo", &args).run()?;
    }
    Ok(())
}
