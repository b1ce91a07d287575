use anyhow::Result;

#[cfg(feature = "cli")]
mod main {
    use super::*;
    use clap::{Parser, Subcommand};
    use small_linalg::simd::{self, RegisterBinding};

    #[derive(Debug, Parser)]
    #[command(about = "Fixed-size linear algebra with compile-time SIMD selection", long_about = None)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Debug, Subcommand)]
    enum Command {
        /// Print the SIMD register bound to each (scalar, dimension) pair in
        /// this build
        Registers {
            /// Only list pairs that are bound to a native register
            #[arg(short, long)]
            bound_only: bool,
        },
        /// Log the register bindings through the logger (use `RUST_LOG=debug`
        /// to include unbound pairs)
        Log,
    }

    pub fn main() -> Result<()> {
        env_logger::init();

        let cli = Cli::parse();

        match cli.command {
            Command::Registers { bound_only } => {
                let bindings: Vec<RegisterBinding> = simd::register_bindings()
                    .into_iter()
                    .filter(|binding| binding.has_register || !bound_only)
                    .collect();

                if bindings.is_empty() {
                    anyhow::bail!("No (scalar, dimension) pair is bound to a SIMD register in this build");
                }
                for binding in bindings {
                    println!("{binding}");
                }
                Ok(())
            }
            Command::Log => {
                simd::log_register_bindings();
                Ok(())
            }
        }
    }
}

#[cfg(not(feature = "cli"))]
mod main {
    use super::*;

    pub fn main() -> Result<()> {
        anyhow::bail!("This binary requires the `cli` feature to be enabled.")
    }
}

fn main() -> Result<()> {
    main::main()
}
