use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::info;

use fuzzydraw::candidate::RandomMode;
use fuzzydraw::canvas::Canvas;
use fuzzydraw::cli::{default_output_path, Cli};
use fuzzydraw::error::{DrawError, DrawResult};
use fuzzydraw::session::Session;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fuzzydraw=info".into()),
        )
        .with_target(false)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // -h/-V exit 0; anything else is a usage error
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fuzzydraw: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: Cli) -> DrawResult<()> {
    let mode = RandomMode::from_flag(cli.mode)
        .ok_or_else(|| DrawError::Args(format!("random mode must be 0-2, got {}", cli.mode)))?;

    info!("reading {}", cli.input.display());
    let decoded =
        image::open(&cli.input).map_err(|err| DrawError::read_image(err, &cli.input))?;
    let source = Canvas::from_rgb(&decoded.to_rgb8())?;
    let (width, height) = (source.width(), source.height());

    let iterations = cli
        .iterations
        .unwrap_or_else(|| width as u64 * height as u64 / 2);
    let output = cli.output.unwrap_or_else(default_output_path);

    let mut session = Session::new(source, mode, cli.sample_step, cli.seed)?;

    info!(
        iterations,
        ?mode,
        stride = cli.sample_step,
        "drawing {}x{} canvas",
        width,
        height
    );
    let start = Instant::now();
    session.run(iterations);
    let report = session.report(start.elapsed());

    encode_canvas(session.accepted_canvas(), &output)?;

    println!(
        "Finished drawing {} in {:.3}s.",
        output.display(),
        report.elapsed.as_secs_f64()
    );
    println!(
        "{} successful and {} failed draws ({:.2}% success rate).",
        report.stats.accepted,
        report.stats.rejected,
        report.stats.success_rate()
    );
    println!("Mean per-pixel distance: {:.2}", report.mean_px_dist);
    Ok(())
}

/// Hand the final canvas to the codec. Always PNG, regardless of the
/// output path's extension.
fn encode_canvas(canvas: &Canvas, path: &Path) -> DrawResult<()> {
    image::save_buffer_with_format(
        path,
        canvas.data(),
        canvas.width(),
        canvas.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|err| DrawError::write_image(err, path))
}
