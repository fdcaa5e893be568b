use async_trait::async_trait;
use eyre::{Result, WrapErr};
use tokio::io::{AsyncBufRead, AsyncBufReadExt as _, AsyncWrite, AsyncWriteExt as _};

use crate::Point;

// A Codec reads and writes one Point per line.
#[async_trait]
pub trait Codec {
    async fn encode<W: AsyncWrite + Unpin + Send>(&self, writer: &mut W, point: &Point) -> Result<()>;
    // Returns Ok(None) at end of input.
    async fn decode<R: AsyncBufRead + Unpin + Send>(&self, reader: &mut R) -> Result<Option<Point>>;
}

// Reads the next non-blank line, without its terminator.
async fn next_line<R: AsyncBufRead + Unpin + Send>(reader: &mut R) -> Result<Option<String>> {
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(Some(trimmed.to_string()));
        }
    }
}

pub struct JsonCodec;

#[async_trait]
impl Codec for JsonCodec {
    async fn encode<W: AsyncWrite + Unpin + Send>(&self, writer: &mut W, point: &Point) -> Result<()> {
        writer.write_all(&serde_json::to_vec(point)?).await?;
        writer.write_all(b"\n").await?;
        Ok(())
    }

    async fn decode<R: AsyncBufRead + Unpin + Send>(&self, reader: &mut R) -> Result<Option<Point>> {
        let Some(line) = next_line(reader).await? else {
            return Ok(None);
        };
        let point = serde_json::from_str(&line).wrap_err_with(|| format!("bad point {:?}", line))?;
        Ok(Some(point))
    }
}

// CsvCodec reads "x,y" records. A literal "x,y" header line is skipped.
pub struct CsvCodec;

#[async_trait]
impl Codec for CsvCodec {
    async fn encode<W: AsyncWrite + Unpin + Send>(&self, writer: &mut W, point: &Point) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        wtr.serialize((point.x, point.y))?;
        let buf = wtr.into_inner().map_err(|e| eyre::eyre!(e.to_string()))?;
        writer.write_all(&buf).await?;
        Ok(())
    }

    async fn decode<R: AsyncBufRead + Unpin + Send>(&self, reader: &mut R) -> Result<Option<Point>> {
        loop {
            let Some(line) = next_line(reader).await? else {
                return Ok(None);
            };
            if line.replace(' ', "").eq_ignore_ascii_case("x,y") {
                continue;
            }
            let mut rdr = csv::ReaderBuilder::new()
                .has_headers(false)
                .trim(csv::Trim::All)
                .from_reader(line.as_bytes());
            let record: (f64, f64) = rdr
                .deserialize::<(f64, f64)>()
                .next()
                .ok_or_else(|| eyre::eyre!("no CSV record"))?
                .wrap_err_with(|| format!("bad point {:?}", line))?;
            return Ok(Some(record.into()));
        }
    }
}

/// Detects the encoding of a point stream by peeking at its first byte.
/// Returns None for empty input.
pub async fn detect_format<R: AsyncBufRead + Unpin + Send>(reader: &mut R) -> Result<Option<Format>> {
    let buf = reader.fill_buf().await?;
    Ok(buf.first().map(|&b| if b == b'{' { Format::Json } else { Format::Csv }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    pub async fn decode<R: AsyncBufRead + Unpin + Send>(&self, reader: &mut R) -> Result<Option<Point>> {
        match self {
            Format::Json => JsonCodec.decode(reader).await,
            Format::Csv => CsvCodec.decode(reader).await,
        }
    }

    pub async fn encode<W: AsyncWrite + Unpin + Send>(&self, writer: &mut W, point: &Point) -> Result<()> {
        match self {
            Format::Json => JsonCodec.encode(writer, point).await,
            Format::Csv => CsvCodec.encode(writer, point).await,
        }
    }

    /// Reads every point until end of input.
    pub async fn decode_all<R: AsyncBufRead + Unpin + Send>(&self, reader: &mut R) -> Result<Vec<Point>> {
        let mut points = Vec::new();
        while let Some(point) = self.decode(reader).await? {
            points.push(point);
        }
        Ok(points)
    }
}

impl std::str::FromStr for Format {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Format::Json),
            "csv" => Ok(Format::Csv),
            other => eyre::bail!("unknown encoding: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn json_lines() {
        let input = b"{\"x\":0.0,\"y\":220.5}\n\n{\"x\":1,\"y\":-3}\n";
        let mut rd = BufReader::new(&input[..]);
        assert_eq!(detect_format(&mut rd).await.unwrap(), Some(Format::Json));
        let points = Format::Json.decode_all(&mut rd).await.unwrap();
        assert_eq!(points, vec![Point::new(0.0, 220.5), Point::new(1.0, -3.0)]);
    }

    #[tokio::test]
    async fn csv_with_header() {
        let input = b"x,y\n0,10\n1, 12.5\n";
        let mut rd = BufReader::new(&input[..]);
        assert_eq!(detect_format(&mut rd).await.unwrap(), Some(Format::Csv));
        let points = Format::Csv.decode_all(&mut rd).await.unwrap();
        assert_eq!(points, vec![Point::new(0.0, 10.0), Point::new(1.0, 12.5)]);
    }

    #[tokio::test]
    async fn csv_rejects_garbage() {
        let input = b"0,10\nfoo,bar\n";
        let mut rd = BufReader::new(&input[..]);
        assert!(CsvCodec.decode(&mut rd).await.unwrap().is_some());
        assert!(CsvCodec.decode(&mut rd).await.is_err());
    }

    #[tokio::test]
    async fn empty_input() {
        let mut rd = BufReader::new(&b""[..]);
        assert_eq!(detect_format(&mut rd).await.unwrap(), None);
        assert_eq!(JsonCodec.decode(&mut rd).await.unwrap(), None);
    }

    #[tokio::test]
    async fn encode() {
        let mut out = Vec::new();
        JsonCodec.encode(&mut out, &Point::new(1.0, 2.5)).await.unwrap();
        CsvCodec.encode(&mut out, &Point::new(3.0, 4.25)).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"x\":1.0,\"y\":2.5}\n3.0,4.25\n");
    }

    #[test]
    fn parse_format() {
        assert_eq!("csv".parse::<Format>().unwrap(), Format::Csv);
        assert!("msgpack".parse::<Format>().is_err());
    }
}
