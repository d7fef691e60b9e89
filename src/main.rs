use clap::Parser;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use tapebf::cli_util::print_interpreter_error;
use tapebf::program::load as load_program;
use tapebf::{Config, Engine};

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} <PATH>    # Run the Brainfuck program stored in PATH

Options:
  --help, -h   Show this help

Notes:
- Every character other than ><+-.,[] in the file is ignored.
- Input (`,`) reads a single byte from stdin; on EOF execution fails unless BF_EOF=zero|max|unchanged.
- The tape has 100 cells; leaving it is an error unless BF_TAPE=wrap|grow.
- Settings are read from $BF_CONFIG or <config home>/bf.toml, then from BF_* variables.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[derive(Parser, Debug)]
#[command(name = "bf", disable_help_flag = true)]
struct Cli {
    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,

    /// Brainfuck source file
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,
}

fn run(program: &str, path: PathBuf) -> i32 {
    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{program}: configuration error: {e}");
            let _ = io::stderr().flush();
            return 2;
        }
    };

    let code = match load_program(&path) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{program}: failed to read {}: {e}", path.display());
            let _ = io::stderr().flush();
            return 1;
        }
    };

    let mut bf = Engine::with_config(code, &config);
    let result = if config.trace {
        let mut input = io::stdin().lock();
        let mut output = io::stdout().lock();
        bf.run_traced(&mut input, &mut output, &mut io::stderr().lock())
    } else {
        bf.run()
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            print_interpreter_error(Some(program), &bf.program().to_string(), &err);
            1
        }
    }
}

fn main() {
    // Program name for usage and diagnostics
    let program = env::args().next().unwrap_or_else(|| String::from("bf"));

    let cli = Cli::parse();

    if cli.help {
        usage_and_exit(&program, 0);
    }
    let Some(path) = cli.path else {
        usage_and_exit(&program, 2);
    };

    std::process::exit(run(&program, path));
}
