use clap::Parser;

use avgen_dataset::runner::run_capture;
use avgen_dataset::simulation::builder::CaptureBuilder;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct CliArgs {
    #[arg(short = 'c', long, value_name = "CONFIG_FILE")]
    config: String,
}

fn main() {
    let args = CliArgs::parse();
    let start = std::time::Instant::now();
    let mut builder = CaptureBuilder::new(&args.config);
    let capture = builder.build();
    match run_capture(capture) {
        Ok(_) => {
            let elapsed = start.elapsed();
            println!("Capture finished in {} ms.", elapsed.as_millis());
        }
        Err(e) => {
            eprintln!("Capture failed: {}", e);
            std::process::exit(1);
        }
    }
}
