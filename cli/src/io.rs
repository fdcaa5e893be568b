use eyre::{Result, WrapErr};
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader, BufWriter};
use tracing::debug;
use tribucket::{detect_format, Point};

pub type Input = Box<dyn AsyncBufRead + Unpin + Send>;
pub type Output = Box<dyn AsyncWrite + Unpin + Send>;

/// Opens a point source. "stdin" reads standard input.
pub async fn open_input(name: &str) -> Result<Input> {
    match name {
        "stdin" => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
        _ => {
            let f = File::open(name)
                .await
                .wrap_err_with(|| format!("opening {}", name))?;
            Ok(Box::new(BufReader::new(f)))
        }
    }
}

/// Creates a sink for rendered output. "stdout" writes standard output.
pub async fn create_output(name: &str) -> Result<Output> {
    match name {
        "stdout" => Ok(Box::new(BufWriter::new(tokio::io::stdout()))),
        _ => {
            let f = File::create(name)
                .await
                .wrap_err_with(|| format!("creating {}", name))?;
            Ok(Box::new(BufWriter::new(f)))
        }
    }
}

/// Reads and concatenates the points of every source, in order.
/// Empty sources contribute nothing.
pub async fn read_points(files: &[String]) -> Result<Vec<Point>> {
    let sources: Vec<String> = if files.is_empty() {
        vec!["stdin".to_string()]
    } else {
        files.to_vec()
    };

    let mut points = Vec::new();
    for source in &sources {
        let mut input = open_input(source).await?;
        let Some(format) = detect_format(&mut input).await? else {
            debug!(source = %source, "empty input");
            continue;
        };
        let mut read = format
            .decode_all(&mut input)
            .await
            .wrap_err_with(|| format!("decoding {}", source))?;
        debug!(source = %source, ?format, points = read.len(), "decoded");
        points.append(&mut read);
    }
    Ok(points)
}
