use clap::Args;
use eyre::Result;
use serde_json::json;
use tokio::io::AsyncWriteExt;
use tracing::info;
use tribucket::{Channel, Frame, Generator, Point, View, Window};

use crate::io::create_output;

#[derive(Args, Debug)]
pub struct Opts {
    /// Plot title
    #[clap(long, default_value = "LTTB Plot")]
    title: String,

    /// Output file [default: stdout]
    #[clap(long, default_value = "stdout")]
    output: String,

    /// Maximum number of points per series (LTTB downsampling threshold)
    #[clap(long, default_value_t = 100, allow_negative_numbers = true)]
    threshold: i64,

    /// Inclusive x range to plot, e.g. "100:500" [default: all points]
    #[clap(long, allow_hyphen_values = true)]
    window: Option<Window>,

    /// Number of generated points per channel
    #[clap(long, default_value_t = 1440)]
    size: usize,

    /// Seed for the generated series [default: random]
    #[clap(long)]
    seed: Option<u64>,
}

const COLORS: [(&str, &str); 2] = [("#E9D758", "#297373"), ("#A1CDF4", "#EE7860")];

pub async fn plot(opts: &Opts) -> Result<()> {
    let mut generator = Generator::new(opts.size);
    generator.seed = opts.seed;
    let data = generator.generate();

    let view = View::new(tribucket::threshold(opts.threshold)?).with_window(opts.window);
    let frame = view.render(&data)?;

    let html = generate_plot_html(&opts.title, &plot_data(&frame).to_string());
    info!(channels = frame.series.len(), "rendered plot");

    let mut output = create_output(&opts.output).await?;
    output.write_all(html.as_bytes()).await?;
    output.flush().await?;

    Ok(())
}

fn pairs(points: &[Point]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.x, p.y]).collect()
}

// One entry per channel: its label, colors and both series as [[x,y], ...].
fn plot_data(frame: &Frame) -> serde_json::Value {
    let channels: Vec<serde_json::Value> = Channel::ALL
        .iter()
        .zip(COLORS)
        .filter_map(|(channel, (original_color, sampled_color))| {
            let series = frame.get(*channel)?;
            Some(json!({
                "label": channel.name(),
                "colors": [original_color, sampled_color],
                "original": pairs(&series.original),
                "sampled": pairs(&series.sampled),
            }))
        })
        .collect();
    serde_json::Value::Array(channels)
}

fn generate_plot_html(title: &str, channels: &str) -> String {
    let title = title
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!(
        r##"<!doctype html>
<html>
<head>
  <title>{title}</title>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <style>
    * {{ box-sizing: border-box; }}
    body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 20px; background: #0f1419; color: #e6edf3; }}
    .container {{ max-width: 1600px; margin: 0 auto; }}
    h1 {{ font-size: 24px; font-weight: 600; margin: 0 0 20px 0; }}
    h2 {{ font-size: 16px; font-weight: 600; margin: 0 0 8px 0; text-transform: capitalize; }}
    .chart {{ background: #161b22; border: 1px solid #30363d; border-radius: 8px; padding: 20px; margin-bottom: 20px; }}
    canvas {{ width: 100%; }}
    .legend {{ display: flex; gap: 16px; margin-top: 12px; flex-wrap: wrap; font-size: 13px; }}
    .legend-item {{ display: flex; align-items: center; gap: 6px; }}
    .legend-dot {{ width: 10px; height: 10px; border-radius: 50%; }}
  </style>
</head>
<body>
  <div class="container">
    <h1>{title}</h1>
    <div id="charts"></div>
  </div>
  <script>
    const channels = {channels};
    const H = 320;

    function setup() {{
      const root = document.getElementById('charts');
      channels.forEach((ch, i) => {{
        const div = document.createElement('div');
        div.className = 'chart';
        div.innerHTML = `<h2>${{ch.label}}</h2><canvas id="chart-${{i}}" height="${{H}}"></canvas>` +
          `<div class="legend">` +
          `<div class="legend-item"><span class="legend-dot" style="background:${{ch.colors[0]}}"></span>original (${{ch.original.length}})</div>` +
          `<div class="legend-item"><span class="legend-dot" style="background:${{ch.colors[1]}}"></span>LTTB sampled (${{ch.sampled.length}})</div>` +
          `</div>`;
        root.appendChild(div);
      }});
    }}

    function draw() {{
      channels.forEach((ch, i) => drawChannel(document.getElementById(`chart-${{i}}`), ch));
    }}

    function drawChannel(canvas, ch) {{
      const ctx = canvas.getContext('2d');
      const dpr = window.devicePixelRatio || 1;
      const rect = canvas.getBoundingClientRect();
      canvas.width = rect.width * dpr;
      canvas.height = H * dpr;
      ctx.scale(dpr, dpr);
      const W = rect.width;
      const pad = {{top: 20, right: 20, bottom: 40, left: 70}};
      const pw = W - pad.left - pad.right;
      const ph = H - pad.top - pad.bottom;

      ctx.clearRect(0, 0, W, H);
      if (ch.original.length === 0) return;

      let xMin = Infinity, xMax = -Infinity, yMin = Infinity, yMax = -Infinity;
      for (const [x, y] of ch.original) {{
        if (x < xMin) xMin = x;
        if (x > xMax) xMax = x;
        if (y < yMin) yMin = y;
        if (y > yMax) yMax = y;
      }}

      function xToP(x) {{ return pad.left + (x - xMin) / (xMax - xMin || 1) * pw; }}
      function yToP(y) {{ return pad.top + ph - (y - yMin) / (yMax - yMin || 1) * ph; }}

      ctx.strokeStyle = '#30363d';
      ctx.lineWidth = 1;
      for (let i = 0; i <= 5; i++) {{
        const y = pad.top + (ph / 5) * i;
        ctx.beginPath(); ctx.moveTo(pad.left, y); ctx.lineTo(W - pad.right, y); ctx.stroke();
      }}

      ctx.fillStyle = '#8b949e';
      ctx.font = '11px monospace';
      ctx.textAlign = 'right';
      for (let i = 0; i <= 5; i++) {{
        const val = yMin + (1 - i / 5) * (yMax - yMin);
        ctx.fillText(val.toFixed(2), pad.left - 8, pad.top + (ph / 5) * i + 4);
      }}
      ctx.textAlign = 'center';
      for (let i = 0; i <= 5; i++) {{
        const val = xMin + (i / 5) * (xMax - xMin);
        ctx.fillText(val.toFixed(0), pad.left + (pw / 5) * i, H - pad.bottom + 20);
      }}

      ctx.fillStyle = ch.colors[0];
      for (const [x, y] of ch.original) {{
        ctx.fillRect(xToP(x) - 0.5, yToP(y) - 0.5, 1.5, 1.5);
      }}

      ctx.strokeStyle = ch.colors[1];
      ctx.lineWidth = 1.5;
      ctx.beginPath();
      ch.sampled.forEach(([x, y], j) => {{
        if (j === 0) ctx.moveTo(xToP(x), yToP(y)); else ctx.lineTo(xToP(x), yToP(y));
      }});
      ctx.stroke();
    }}

    setup();
    draw();
    window.addEventListener('resize', draw);
  </script>
</body>
</html>"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_data_has_both_channels() {
        let data = Generator::new(200).seed(9).generate();
        let frame = View::new(20).render(&data).unwrap();
        let value = plot_data(&frame);
        let channels = value.as_array().unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0]["label"], "voltage");
        assert_eq!(channels[1]["label"], "current");
        assert_eq!(channels[0]["original"].as_array().unwrap().len(), 200);
        assert_eq!(channels[0]["sampled"].as_array().unwrap().len(), 20);
        assert_eq!(channels[1]["sampled"][0][0], 0.0);
    }

    #[test]
    fn html_escapes_title() {
        let html = generate_plot_html("a <b> & c", "[]");
        assert!(html.contains("<title>a &lt;b&gt; &amp; c</title>"));
        assert!(html.contains("const channels = [];"));
    }
}
