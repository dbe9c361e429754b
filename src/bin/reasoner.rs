//! Command-line front end
//!
//! `reasoner ONTOLOGY_FILE CLASS_NAME [--verbose]` prints one subsumer of
//! the queried class per line, in canonical textual form, ⊤ filtered.
//! Exit codes: 0 success, 2 missing arguments or unreadable file, 3 parse
//! error or unsupported construct, 4 unknown concept, 1 internal error.

use el_reasoner::error::{ElError, ElResult};
use el_reasoner::parser::LoaderFactory;
use el_reasoner::reasoning::ElReasoner;
use el_reasoner::terms::TermStore;
use std::path::Path;
use std::process::ExitCode;

struct Args {
    ontology_file: String,
    class_name: String,
    verbose: bool,
}

fn parse_args() -> Option<Args> {
    let mut positional = Vec::new();
    let mut verbose = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--verbose" | "-v" => verbose = true,
            _ => positional.push(arg),
        }
    }
    let mut positional = positional.into_iter();
    let args = Args {
        ontology_file: positional.next()?,
        class_name: positional.next()?,
        verbose,
    };
    // Trailing arguments are a usage error.
    positional.next().is_none().then_some(args)
}

fn run(args: &Args) -> ElResult<()> {
    let path = Path::new(&args.ontology_file);
    let loader = LoaderFactory::for_path(path).ok_or_else(|| {
        ElError::Parse(format!(
            "no loader for ontology file {}",
            path.display()
        ))
    })?;

    let mut store = TermStore::new();
    let ontology = loader.parse_file(path, &mut store)?;
    if args.verbose {
        eprintln!(
            "loaded {} axiom(s) over {} concept name(s) from {}",
            ontology.axiom_count(),
            ontology.concept_name_count(),
            path.display()
        );
    }

    let reasoner = ElReasoner::new(store, ontology)?;
    let subsumers = reasoner.subsumers(&args.class_name)?;
    for subsumer in &subsumers {
        println!("{}", subsumer);
    }
    if args.verbose {
        eprintln!("{} subsumer(s) of {}", subsumers.len(), args.class_name);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(args) = parse_args() else {
        eprintln!("usage: reasoner ONTOLOGY_FILE CLASS_NAME [--verbose]");
        return ExitCode::from(2);
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
