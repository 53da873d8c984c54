use color_print::cprintln;
use y86asm::{util, Assembler, Error};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.ys")]
    input: String,

    /// Output file
    #[clap(short, long, default_value = "main.bin")]
    output: String,

    /// Load address of the first byte (decimal, 0x, 0o or 0b)
    #[clap(short, long, default_value = "0", value_parser = parse_base)]
    base: u32,

    /// Dump assembly listing
    #[clap(short, long)]
    dump: bool,

    /// Write label addresses to a YAML file
    #[clap(short, long)]
    symbols: Option<String>,

    /// Enable verbose output
    #[clap(short, long)]
    verbose: bool,
}

fn parse_base(s: &str) -> Result<u32, String> {
    y86asm::parse_with_prefix(s).ok_or(format!("Cannot parse `{s}` as address"))
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    let env = env_logger::Env::default().filter_or(
        "Y86ASM_LOG",
        if args.verbose { "debug" } else { "warn" },
    );
    env_logger::init_from_env(env);

    println!("Y86 Assembler");

    println!("1. Read Source");
    println!("  < {}", args.input);
    let src = match std::fs::read_to_string(&args.input) {
        Ok(src) => src,
        Err(err) => fail(Error::FileOpen(args.input.clone(), err)),
    };

    println!("2. Assemble at 0x{:08X}", args.base);
    let image = match Assembler::new().base(args.base).assemble(&src) {
        Ok(image) => image,
        Err(err) => {
            err.print_diag(&args.input, &src);
            std::process::exit(1);
        }
    };

    println!("3. Write Binary ({} bytes)", image.bytes.len());
    println!("  > {}", args.output);
    if let Err(err) = std::fs::write(&args.output, &image.bytes) {
        fail(Error::FileCreate(args.output.clone(), err));
    }

    if let Some(path) = &args.symbols {
        println!("  > {}", path);
        let yaml = image.labels.to_yaml().unwrap_or_else(|err| fail(err));
        if let Err(err) = std::fs::write(path, yaml) {
            fail(Error::FileCreate(path.clone(), err));
        }
    }

    if args.dump {
        util::print_dump(&image);
    }
}

fn fail(err: Error) -> ! {
    cprintln!("<red,bold>error</>: {}", err);
    if let Some(source) = std::error::Error::source(&err) {
        cprintln!("  <blue>caused by</>: {}", source);
    }
    std::process::exit(1);
}
