use crate::commands::{
    run_documents, run_estimate, run_offices, run_schedule, DocumentsArgs, EstimateArgs,
    OfficesArgs, ScheduleArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use conservador::error::AppError;
use conservador::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Conservador de Bienes Raices",
    about = "Registry fee calculator, office directory and procedure guide",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Estimate registry fees for an inscription
    Estimate(EstimateArgs),
    /// Print the tariff schedule
    Schedule(ScheduleArgs),
    /// List registry offices, optionally for a single region
    Offices(OfficesArgs),
    /// Print the required documents per transaction
    Documents(DocumentsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    if !matches!(command, Command::Serve(_)) {
        telemetry::init_for_cli()?;
    }

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args, &mut std::io::stdout().lock()),
        Command::Schedule(args) => run_schedule(args, &mut std::io::stdout().lock()),
        Command::Offices(args) => run_offices(args, &mut std::io::stdout().lock()),
        Command::Documents(args) => run_documents(args, &mut std::io::stdout().lock()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["conservador"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_estimate_flags() {
        let cli = Cli::try_parse_from([
            "conservador",
            "estimate",
            "--tipo",
            "hipoteca",
            "--valor",
            "80000000",
            "--sin-certificados",
        ])
        .expect("parses");
        let Some(Command::Estimate(args)) = cli.command else {
            panic!("expected estimate command");
        };
        assert_eq!(args.tipo, "hipoteca");
        assert_eq!(args.valor, 80_000_000.0);
        assert!(args.sin_certificados);
    }

    #[test]
    fn rejects_negative_values() {
        assert!(Cli::try_parse_from(["conservador", "estimate", "--valor", "-1"]).is_err());
    }
}
