use clap::Parser;
use speedtest_client::emitter::{Emitter, HumanReadableEmitter, JsonEmitter, TestKind};
use speedtest_client::summary::Summary;
use speedtest_client::transport::HttpTransport;
use speedtest_client::{download, latency, locate, transport, upload};

#[derive(Clone, Debug, clap::ValueEnum)]
enum Format {
    Human,
    Json,
}

#[derive(Parser, Debug)]
struct Cli {
    /// Show available servers and exit
    #[arg(short, long)]
    list: bool,
    /// Select server id(s) to test against; defaults to the nearest
    #[arg(short, long = "server")]
    servers: Vec<String>,
    /// Output format to use: 'human' or 'json' for batch processing
    #[arg(long, default_value = "human")]
    format: Format,
    /// Skip the download measurement
    #[arg(long)]
    no_download: bool,
    /// Skip the upload measurement
    #[arg(long)]
    no_upload: bool,
    /// Cheap one-shot upload sample instead of a calibrated burst
    #[arg(long)]
    reduced_upload: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.no_download && cli.no_upload && !cli.list {
        eprintln!("error: nothing to do, both download and upload are disabled");
        std::process::exit(1);
    }

    let mut emitter: Box<dyn Emitter> = match cli.format {
        Format::Human => Box::new(HumanReadableEmitter::new(std::io::stdout())),
        Format::Json => Box::new(JsonEmitter::new(std::io::stdout())),
    };

    let servers = locate::fetch_servers(&transport::user_agent()).await?;

    if cli.list {
        for s in &servers {
            println!(
                "[{:>4}] {:8.2} km {} ({}) by {}",
                s.id, s.distance, s.name, s.country, s.sponsor
            );
        }
        return Ok(());
    }

    let targets = locate::find_servers(servers, &cli.servers)?;
    let http = HttpTransport::new()?;
    let mut measured = Vec::new();

    // A failing server is reported and skipped; the rest of the run goes on.
    for mut server in targets {
        emitter.on_server(&server)?;

        emitter.on_starting(TestKind::Latency)?;
        match latency::measure(&mut server, &http).await {
            Ok(()) => emitter.on_result(TestKind::Latency, &server)?,
            Err(err) => {
                emitter.on_error(TestKind::Latency, &err.to_string())?;
                continue;
            }
        }

        if !cli.no_download {
            emitter.on_starting(TestKind::Download)?;
            match download::measure(&mut server, &http).await {
                Ok(()) => emitter.on_result(TestKind::Download, &server)?,
                Err(err) => {
                    emitter.on_error(TestKind::Download, &err.to_string())?;
                    continue;
                }
            }
        }

        if !cli.no_upload {
            emitter.on_starting(TestKind::Upload)?;
            match upload::measure(&mut server, &http, cli.reduced_upload).await {
                Ok(()) => emitter.on_result(TestKind::Upload, &server)?,
                Err(err) => {
                    emitter.on_error(TestKind::Upload, &err.to_string())?;
                    continue;
                }
            }
        }

        if !cli.no_download && !cli.no_upload && !server.is_result_plausible() {
            emitter.on_implausible(&server)?;
        }

        measured.push(server);
    }

    emitter.on_summary(&Summary::from_servers(&measured))?;

    Ok(())
}
