use clap::Parser;
use de_core::{
    CallbackAction, CallbackFn, CsvProgress, DEConfig, DEConfigBuilder, DEError, DEIntermediate,
    DEReport, Mutation, ParallelConfig, ParentSelection, Recombination, Updating,
    differential_evolution,
};
use de_objectives::{FunctionMetadata, ObjectiveFn, function_names, get_function, get_function_metadata};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(
    name = "run_de",
    about = "Minimize a catalog function with parallel differential evolution"
)]
struct Cli {
    /// Name of the function to minimize (use --list-functions to see available options)
    #[arg(long, default_value = "sum_of_squares")]
    function: String,

    /// Dimensionality of the problem (defaults to the function's own dimension, or 10)
    #[arg(long)]
    dim: Option<usize>,

    /// Number of agents in the population
    #[arg(long, default_value_t = 100)]
    population: usize,

    /// Number of generations to run
    #[arg(long, default_value_t = 1000)]
    maxiter: usize,

    /// Lower bound of every dimension (defaults to the function's bounds)
    #[arg(long, allow_hyphen_values = true)]
    min: Option<f64>,

    /// Upper bound of every dimension (defaults to the function's bounds)
    #[arg(long, allow_hyphen_values = true)]
    max: Option<f64>,

    /// Fixed mutation factor; overrides the dithering range
    #[arg(long)]
    mutation_factor: Option<f64>,

    /// Minimum mutation factor of the dithering range
    #[arg(long, default_value_t = 0.2)]
    mutation_min: f64,

    /// Maximum mutation factor of the dithering range (exclusive)
    #[arg(long, default_value_t = 0.95)]
    mutation_max: f64,

    /// Fixed crossover probability; overrides the crossover range
    #[arg(long)]
    crossover: Option<f64>,

    /// Minimum crossover probability
    #[arg(long, default_value_t = 0.1)]
    crossover_min: f64,

    /// Maximum crossover probability (exclusive)
    #[arg(long, default_value_t = 1.0)]
    crossover_max: f64,

    /// Draw three distinct parents, all different from the updated agent
    #[arg(long)]
    distinct_parents: bool,

    /// Read parents from a snapshot taken at the start of each generation
    #[arg(long)]
    deferred: bool,

    /// Optional random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Print progress every N generations (>= 1)
    #[arg(long, default_value_t = 100)]
    report_every: usize,

    /// Stop the optimization after this many seconds (optional)
    #[arg(long)]
    max_seconds: Option<f64>,

    /// Disable parallel evaluation of the population
    #[arg(long)]
    no_parallel: bool,

    /// Number of worker threads (0 = use all available cores)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Write generation,mean,minimum rows to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Repeat the optimization and report wall-clock statistics
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// List all available functions and exit
    #[arg(long)]
    list_functions: bool,

    /// Show metadata for the selected function before running optimization
    #[arg(long)]
    show_metadata: bool,
}

impl Cli {
    fn mutation(&self) -> Mutation {
        match self.mutation_factor {
            Some(f) => Mutation::Factor(f),
            None => Mutation::Range {
                min: self.mutation_min,
                max: self.mutation_max,
            },
        }
    }

    fn recombination(&self) -> Recombination {
        match self.crossover {
            Some(cr) => Recombination::Rate(cr),
            None => Recombination::Range {
                min: self.crossover_min,
                max: self.crossover_max,
            },
        }
    }

    fn parallel(&self) -> ParallelConfig {
        ParallelConfig {
            enabled: !self.no_parallel,
            num_threads: if self.threads == 0 {
                None
            } else {
                Some(self.threads)
            },
        }
    }
}

fn main() {
    env_logger::init();
    let args = Cli::parse();

    if args.list_functions {
        list_available_functions();
        return;
    }

    let function_name = args.function.trim().to_lowercase();
    let function = get_function(&function_name).unwrap_or_else(|| {
        eprintln!(
            "Error: function '{}' not found. Use --list-functions to inspect available names.",
            args.function
        );
        process::exit(2);
    });

    let metadata_map = get_function_metadata();
    let Some(metadata) = metadata_map.get(&function_name) else {
        eprintln!("Error: no metadata available for '{function_name}'.");
        process::exit(2);
    };

    if args.show_metadata {
        print_metadata(metadata);
    }

    let Some(dim) = metadata.resolve_dimension(args.dim) else {
        eprintln!(
            "Error: '{}' is defined for {} dimension(s) only; got --dim {}",
            function_name,
            metadata.dimension.unwrap_or_default(),
            args.dim.unwrap_or_default()
        );
        process::exit(2);
    };
    let (min, max) = (
        args.min.unwrap_or(metadata.bounds.0),
        args.max.unwrap_or(metadata.bounds.1),
    );

    if args.runs == 0 {
        eprintln!("Error: --runs must be at least 1.");
        process::exit(2);
    }
    if args.runs > 1 && args.csv.is_some() {
        eprintln!("Error: --csv records a single run; drop it or use --runs 1.");
        process::exit(2);
    }
    if let Some(secs) = args.max_seconds
        && !(secs.is_finite() && secs >= 0.0)
    {
        eprintln!("Error: --max-seconds must be a non-negative number; got {secs}");
        process::exit(2);
    }

    let settings = RunSettings {
        function_name: &function_name,
        function,
        dim,
        min,
        max,
    };

    if args.runs == 1 {
        single_run(&args, &settings);
    } else {
        benchmark(&args, &settings);
    }
}

struct RunSettings<'a> {
    function_name: &'a str,
    function: ObjectiveFn,
    dim: usize,
    min: f64,
    max: f64,
}

fn build_config(
    args: &Cli,
    settings: &RunSettings<'_>,
    seed: Option<u64>,
    callback: Option<CallbackFn>,
) -> Result<DEConfig, DEError> {
    let mut builder = DEConfigBuilder::new()
        .dim(settings.dim)
        .popsize(args.population)
        .bounds(settings.min, settings.max)
        .maxiter(args.maxiter)
        .mutation(args.mutation())
        .recombination(args.recombination())
        .parents(if args.distinct_parents {
            ParentSelection::Distinct
        } else {
            ParentSelection::WithReplacement
        })
        .updating(if args.deferred {
            Updating::Deferred
        } else {
            Updating::Immediate
        })
        .report_every(args.report_every)
        .parallel(args.parallel());

    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    if let Some(secs) = args.max_seconds {
        builder = builder.max_time(Duration::from_secs_f64(secs));
    }
    if let Some(cb) = callback {
        builder = builder.callback(cb);
    }
    builder.build()
}

fn progress_callback(mut csv: Option<CsvProgress<BufWriter<File>>>) -> CallbackFn {
    Box::new(move |intermediate: &DEIntermediate| {
        println!(
            "gen {:>6} | mean = {:>12.6e} | min = {:>12.6e} | accepted = {:>5} | CR = {:.3} | F = {:.3}",
            intermediate.iter,
            intermediate.mean,
            intermediate.fun,
            intermediate.accepted,
            intermediate.params.crossover,
            intermediate.params.mutation
        );
        if let Some(sink) = csv.as_mut()
            && let Err(e) = sink.record(intermediate).and_then(|_| sink.flush())
        {
            log::warn!("failed to write CSV row for generation {}: {}", intermediate.iter, e);
        }
        CallbackAction::Continue
    })
}

fn single_run(args: &Cli, settings: &RunSettings<'_>) {
    let csv = args.csv.as_ref().map(|path| match File::create(path) {
        Ok(file) => CsvProgress::new(BufWriter::new(file)),
        Err(e) => {
            eprintln!("Error: cannot create {}: {}", path.display(), e);
            process::exit(2);
        }
    });

    let config = build_config(args, settings, args.seed, Some(progress_callback(csv)))
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(2);
        });

    println!(
        "Running DE on '{}' ({}D, population {}, {} generations) in [{}, {}]...",
        settings.function_name, settings.dim, config.popsize, config.maxiter, settings.min, settings.max
    );

    let report = run_or_exit(settings.function, config);
    print_report(&report);
}

fn benchmark(args: &Cli, settings: &RunSettings<'_>) {
    println!(
        "Benchmarking DE on '{}' ({}D) over {} runs...",
        settings.function_name, settings.dim, args.runs
    );

    let mut times_ms = Vec::with_capacity(args.runs);
    let mut best = f64::INFINITY;
    for run in 0..args.runs {
        let seed = args.seed.map(|s| s.wrapping_add(run as u64));
        let config = build_config(args, settings, seed, None).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(2);
        });
        let start = Instant::now();
        let report = run_or_exit(settings.function, config);
        let ms = start.elapsed().as_secs_f64() * 1000.0;
        log::info!("run {}: {:.3} ms, best = {:.6e}", run + 1, ms, report.fun);
        best = best.min(report.fun);
        times_ms.push(ms);
    }

    let total: f64 = times_ms.iter().sum();
    let fastest = times_ms.iter().cloned().fold(f64::INFINITY, f64::min);
    let slowest = times_ms.iter().cloned().fold(0.0, f64::max);
    println!("Average time: {:.3} ms", total / times_ms.len() as f64);
    println!("Min time: {:.3} ms", fastest);
    println!("Max time: {:.3} ms", slowest);
    println!("Best objective over all runs: {:.6e}", best);
}

fn run_or_exit(function: ObjectiveFn, config: DEConfig) -> DEReport {
    match differential_evolution(&function, config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: optimization failed: {e}");
            process::exit(if e.is_config_error() { 2 } else { 1 });
        }
    }
}

fn print_report(report: &DEReport) {
    println!("\nOptimization completed in {:.2?}", report.elapsed);
    println!("Status: {}", report.message);
    println!(
        "Generations: {} | Evaluations: {} | Seed: {}",
        report.nit, report.nfev, report.seed
    );
    println!("Best objective: {:.6e}", report.fun);
    println!("Best parameters: [{}]", format_vector(report.x.iter()));
}

fn format_vector<'a>(values: impl Iterator<Item = &'a f64>) -> String {
    let mut buffer = String::new();
    for (idx, value) in values.enumerate() {
        if idx > 0 {
            buffer.push_str(", ");
        }
        let _ = write!(&mut buffer, "{value:.6}");
    }
    buffer
}

fn list_available_functions() {
    let names = function_names();
    println!("Available functions ({}):", names.len());
    for name in names {
        println!("- {name}");
    }
}

fn print_metadata(meta: &FunctionMetadata) {
    println!("Function: {}", meta.name);
    println!("Description: {}", meta.description);
    match meta.dimension {
        Some(d) => println!("Dimension: {d}"),
        None => println!("Dimension: any"),
    }
    println!("Bounds: [{}, {}] per dimension", meta.bounds.0, meta.bounds.1);
    println!("Multimodal: {}", meta.multimodal);
    for (x, f) in &meta.global_minima {
        println!("Global minimum: f([{}]) = {}", format_vector(x.iter()), f);
    }
    println!();
}
