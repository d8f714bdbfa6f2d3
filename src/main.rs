use clap::{Args, Parser, Subcommand};
use parquet_ddl::runner::{
    DdlArgs, Dialect, InspectArgs, S3ConnectArgs, S3ConnectArgsBuilder, run_ddl, run_inspect,
};

/// Rows shown by `inspect --head` when no count is given
const DEFAULT_HEAD_ROWS: &str = "5";

#[derive(Parser, Clone)]
#[command(version, about = "Inspect Parquet schemas and turn them into CREATE TABLE statements")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Quiet mode - only warnings and errors on stderr
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Object store connection, used only for s3:// sources
#[derive(Args, Clone)]
struct S3Options {
    /// S3-compatible endpoint URL [default: http://localhost:9000]
    #[arg(long)]
    endpoint: Option<String>,

    /// Access key [default: trino]
    #[arg(long)]
    access_key: Option<String>,

    /// Secret key [default: trino123]
    #[arg(long)]
    secret_key: Option<String>,

    /// Region used for request signing [default: us-east-1]
    #[arg(long)]
    region: Option<String>,
}

impl S3Options {
    fn into_connect_args(self) -> anyhow::Result<S3ConnectArgs> {
        let mut builder = S3ConnectArgsBuilder::default();
        if let Some(endpoint) = self.endpoint {
            builder.endpoint(endpoint);
        }
        if let Some(access_key) = self.access_key {
            builder.access_key(access_key);
        }
        if let Some(secret_key) = self.secret_key {
            builder.secret_key(secret_key);
        }
        if let Some(region) = self.region {
            builder.region(aws_config::Region::new(region));
        }
        Ok(builder.build()?)
    }
}

#[derive(Clone, Subcommand)]
enum Command {
    /// Print a CREATE TABLE statement derived from a Parquet file's schema
    Ddl {
        /// Path to the Parquet file or S3 URI (local path, s3://bucket/key)
        source_uri: String,

        /// Table name (default: file name without extension)
        #[arg(short, long)]
        table: Option<String>,

        /// Type names to emit (native, postgres)
        #[arg(short, long, default_value = "native")]
        dialect: String,

        #[command(flatten)]
        s3: S3Options,
    },
    /// Print every column of a Parquet file with its type
    Inspect {
        /// Path to the Parquet file or S3 URI (s3://bucket/key)
        source_uri: String,

        /// Also print the first rows (5, or N with --head=N)
        #[arg(
            long,
            value_name = "N",
            num_args = 0..=1,
            require_equals = true,
            default_missing_value = DEFAULT_HEAD_ROWS
        )]
        head: Option<usize>,

        #[command(flatten)]
        s3: S3Options,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so stdout carries only the result
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    let filter = if args.quiet {
        EnvFilter::new("parquet_ddl=warn")
    } else {
        EnvFilter::new("parquet_ddl=info")
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match args.command {
        Command::Ddl {
            source_uri,
            table,
            dialect,
            s3,
        } => {
            let ddl = run_ddl(DdlArgs {
                source_uri,
                table,
                dialect: Dialect::parse(&dialect)?,
                s3: s3.into_connect_args()?,
            })
            .await?;
            println!("{}", ddl);
        }
        Command::Inspect {
            source_uri,
            head,
            s3,
        } => {
            let inspection = run_inspect(InspectArgs {
                source_uri,
                head,
                s3: s3.into_connect_args()?,
            })
            .await?;
            println!("{}", inspection.render()?);
        }
    }
    Ok(())
}
