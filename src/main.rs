use inkline::{render_to_svg, InkDocument, InkError, InkLoader, RenderSettings};
use serde::Serialize;
use std::env;
use std::fs;
use std::process;

#[derive(Serialize)]
struct DocumentStats<'a> {
    contexts: usize,
    brushes: usize,
    traces: usize,
    points: u64,
    channels: &'a inkline::ChannelAggregates,
}

/// A simple CLI to convert an InkML file into an SVG rendering.
fn main() -> Result<(), InkError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut dpi = 150.0;
    let mut ignore_pressure = false;
    let mut stats = false;
    let mut paths = Vec::new();

    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--dpi" => match iter.next().and_then(|v| v.parse::<f64>().ok()) {
                Some(value) if value > 0.0 => dpi = value,
                _ => usage(&args[0], "--dpi expects a positive number"),
            },
            "--ignore-pressure" => ignore_pressure = true,
            "--stats" => stats = true,
            flag if flag.starts_with("--") => usage(&args[0], &format!("unknown flag {flag}")),
            path => paths.push(path.to_string()),
        }
    }
    if paths.len() != 2 {
        usage(&args[0], "expected an input and an output path");
    }

    println!("Loading ink from {}", paths[0]);
    let document = InkLoader::new().dpi(dpi).load_file(&paths[0])?;

    if stats {
        print_stats(&document);
    }

    let settings = RenderSettings { dpi, ignore_pressure };
    let (svg, problems) = render_to_svg(&document, settings)?;
    for problem in &problems {
        eprintln!("warning: {problem}");
    }

    fs::write(&paths[1], svg)?;
    println!("Wrote {}", paths[1]);
    Ok(())
}

fn print_stats(document: &InkDocument) {
    let stats = DocumentStats {
        contexts: document.contexts().count(),
        brushes: document.brushes().count(),
        traces: document.traces().len(),
        points: document.aggregates().count(0),
        channels: document.aggregates(),
    };
    match serde_json::to_string_pretty(&stats) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("warning: could not serialize stats: {e}"),
    }
}

fn usage(program: &str, problem: &str) -> ! {
    eprintln!("error: {problem}");
    eprintln!();
    eprintln!("Render an InkML ink file to SVG.");
    eprintln!();
    eprintln!("Usage: {program} [options] <input.inkml> <output.svg>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --dpi <n>            output resolution (default 150)");
    eprintln!("  --ignore-pressure    constant-width strokes");
    eprintln!("  --stats              print document statistics as JSON");
    process::exit(1);
}
