use circlepick::Callbacks;
use circlepick::config;
use circlepick::events::PointerEvent;
use circlepick::render::ApproxTextMeasure;
use circlepick::svg;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "circlepick", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to use instead of the per-user one
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Draw the picker and print the result.
    Render {
        #[arg(long, default_value_t = 200.0)]
        width: f64,
        #[arg(long, default_value_t = 200.0)]
        height: f64,
        /// Overrides the configured value
        #[arg(long, allow_hyphen_values = true)]
        value: Option<f64>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,
    },
    /// Feed pointer events (down:x,y move:x,y up cancel) and print the notifications.
    Simulate {
        #[arg(required = true, allow_hyphen_values = true)]
        events: Vec<PointerEvent>,
        #[arg(long, default_value_t = 200.0)]
        width: f64,
        #[arg(long, default_value_t = 200.0)]
        height: f64,
    },
    /// Write the default config file and print its path.
    InitConfig,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Svg,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Render {
            width,
            height,
            value,
            format,
        } => {
            let cfg = config::load_config(config_path)?;
            let mut picker = cfg.build_picker(())?;
            if let Some(v) = value {
                picker.set_value(v);
            }
            let (w, h) = picker.measure(width, height);
            let commands = picker.render(&ApproxTextMeasure);

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&commands)?),
                OutputFormat::Svg => print!("{}", svg::to_svg(&commands, w, h)),
            }
            Ok(())
        }
        Commands::Simulate {
            events,
            width,
            height,
        } => {
            let cfg = config::load_config(config_path)?;
            let callbacks = Callbacks::new()
                .on_changing(|v| println!("changing {v}"))
                .on_changed(|v| println!("changed {v}"));
            let mut picker = cfg.build_picker(callbacks)?;
            picker.measure(width, height);

            for event in events {
                let action = picker.handle(event);
                log::debug!("{event} -> {action:?}");
                if action.clicked {
                    println!("clicked");
                }
            }
            println!("value {}", picker.formatted_value());
            Ok(())
        }
        Commands::InitConfig => {
            let path = config::write_default_config(config_path)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
