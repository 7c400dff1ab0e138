use std::path::PathBuf;

use clap::Args;
use dalgen_codegen_go::Generator;
use dalgen_core::OutputFile;
use eyre::Result;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the schema dump
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Path of the Go source file to write
    #[arg(short, long)]
    pub out: PathBuf,

    /// Package name for the generated code
    #[arg(short, long)]
    pub package: String,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let schema = dalgen_schema::parse_file(&self.schema).unwrap_or_exit();

        let source = match Generator::new(&schema, &self.package).generate() {
            Ok(source) => source,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        };

        // The file only exists once the whole emission succeeded.
        OutputFile::new(&self.out, source).write()?;

        println!(
            "Generated {} table{} -> {}",
            schema.tables.len(),
            if schema.tables.len() == 1 { "" } else { "s" },
            self.out.display()
        );

        Ok(())
    }
}
