//! pdf_lens command line
//!
//! Extracts text from PDFs (or reads already extracted text) and runs one
//! analysis over it.
//!
//! Usage:
//!   pdf_lens <command> [options] <input>...
//!
//! Inputs ending in `.pdf` are extracted; anything else is read as text.
//! Set `RUST_LOG=debug` for detailed logs.

use pdf_lens::analysis::{analyze, extract_keywords, generate_summary, segment, SegmentKind};
use pdf_lens::converters::{export, table_to_csv, ExportFormat, FormatOptions};
use pdf_lens::ingest::{BatchStats, FileInput, IngestEvent, Ingestor, PageSelection};
use pdf_lens::layout::detect_tables;
use pdf_lens::metadata::{describe, metadata_or_none};
use pdf_lens::search::{highlight, replace_all, search, SearchOptions};
use pdf_lens::task::CancellationToken;
use pdf_lens::Document;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;

const USAGE: &str = "\
Usage: pdf_lens <command> [options] <input>...

Commands:
  extract                      Print the extracted text
  tables                       Detect tables (--csv-dir DIR writes one CSV per table)
  keywords                     Top keywords (--count N, default 10)
  summary                      Extractive summary (--percent P, 10-50, default 30)
  search <pattern>             List matches (--highlight prints marked text)
  replace <pattern> <with>     Replace all matches
  segment                      Paragraphs, or sentences with --sentences
  format                       Apply formatting rules (--all or individual flags)
  stats                        Document statistics
  metadata                     PDF document information
  export                       Encode as --format txt|json|csv|md

Options:
  --start N, --end N           Page range for PDF inputs
  --output FILE                Write the result to FILE instead of stdout
  --json                       JSON output where supported
  --case-sensitive, --whole-word, --literal, --max N
                               Search options
  --extra-spaces, --line-breaks, --empty-lines, --trim-lines,
  --capitalize, --special-chars, --paragraphs
                               Formatting rules";

#[derive(Default)]
struct CliArgs {
    command: String,
    positional: Vec<String>,
    inputs: Vec<PathBuf>,
    selection: PageSelection,
    output: Option<PathBuf>,
    json: bool,
    count: usize,
    percent: u32,
    sentences: bool,
    highlight: bool,
    search: SearchOptions,
    format: FormatOptions,
    export_format: Option<String>,
    csv_dir: Option<PathBuf>,
}

impl CliArgs {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut cli = CliArgs {
            count: 10,
            percent: 30,
            ..Default::default()
        };

        let mut iter = args.into_iter();
        cli.command = iter.next().ok_or_else(|| USAGE.to_string())?;
        let mut rest = Vec::new();

        while let Some(arg) = iter.next() {
            let mut value = |name: &str| iter.next().ok_or(format!("{} needs a value", name));
            match arg.as_str() {
                "--start" => cli.selection.start = Some(parse_num(&value("--start")?)?),
                "--end" => cli.selection.end = Some(parse_num(&value("--end")?)?),
                "--output" | "-o" => cli.output = Some(PathBuf::from(value("--output")?)),
                "--json" => cli.json = true,
                "--count" | "-n" => cli.count = parse_num(&value("--count")?)? as usize,
                "--percent" | "-p" => cli.percent = parse_num(&value("--percent")?)?,
                "--sentences" => cli.sentences = true,
                "--highlight" => cli.highlight = true,
                "--case-sensitive" => cli.search.case_sensitive = true,
                "--whole-word" => cli.search.whole_word = true,
                "--literal" => cli.search.literal = true,
                "--max" => cli.search.max_results = parse_num(&value("--max")?)? as usize,
                "--all" => cli.format = FormatOptions::all(),
                "--extra-spaces" => cli.format.remove_extra_spaces = true,
                "--line-breaks" => cli.format.normalize_line_breaks = true,
                "--empty-lines" => cli.format.remove_empty_lines = true,
                "--trim-lines" => cli.format.trim_lines = true,
                "--capitalize" => cli.format.capitalize_sentences = true,
                "--special-chars" => cli.format.remove_special_chars = true,
                "--paragraphs" => cli.format.format_paragraphs = true,
                "--format" | "-f" => cli.export_format = Some(value("--format")?),
                "--csv-dir" => cli.csv_dir = Some(PathBuf::from(value("--csv-dir")?)),
                "--help" | "-h" => return Err(USAGE.to_string()),
                flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
                _ => rest.push(arg),
            }
        }

        let wanted = match cli.command.as_str() {
            "search" => 1,
            "replace" => 2,
            _ => 0,
        };
        if rest.len() < wanted {
            return Err(format!("{} needs {} argument(s) before the inputs", cli.command, wanted));
        }
        cli.inputs = rest.split_off(wanted).into_iter().map(PathBuf::from).collect();
        cli.positional = rest;

        if cli.inputs.is_empty() {
            return Err(USAGE.to_string());
        }
        Ok(cli)
    }
}

fn parse_num(s: &str) -> Result<u32, String> {
    s.parse().map_err(|_| format!("'{}' is not a number", s))
}

struct Loaded {
    document: Document,
    files: Vec<FileInput>,
    stats: Option<BatchStats>,
}

fn is_pdf(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn load(cli: &CliArgs) -> Result<Loaded, Box<dyn std::error::Error>> {
    if !cli.inputs.iter().any(|p| is_pdf(p)) {
        let mut texts = Vec::new();
        for path in &cli.inputs {
            texts.push(fs::read_to_string(path)?);
        }
        return Ok(Loaded {
            document: Document::new(texts.join("\n\n")),
            files: Vec::new(),
            stats: None,
        });
    }

    let files = cli
        .inputs
        .iter()
        .map(FileInput::from_path)
        .collect::<pdf_lens::Result<Vec<_>>>()?;

    let (tx, rx) = crossbeam_channel::unbounded();
    let reporter = thread::spawn(move || {
        for event in rx {
            match event {
                IngestEvent::FileStarted { name, .. } => log::info!("Extracting {}", name),
                IngestEvent::Progress { percent } => {
                    eprint!("\r{}% complete", percent);
                }
                IngestEvent::FileFinished { name, pages, .. } => {
                    log::info!("Finished {} ({} pages)", name, pages)
                }
            }
        }
        eprintln!();
    });

    let result = Ingestor::lopdf().run(&files, cli.selection, Some(&tx), &CancellationToken::new());
    drop(tx);
    let _ = reporter.join();
    let report = result?;

    let tables = detect_tables(report.document.text()).len();
    let stats = BatchStats::from_report(&report, tables);
    Ok(Loaded {
        document: report.document,
        files,
        stats: Some(stats),
    })
}

fn run(cli: &CliArgs) -> Result<String, Box<dyn std::error::Error>> {
    let loaded = load(cli)?;
    let doc = &loaded.document;
    let text = doc.text();

    if let Some(stats) = &loaded.stats {
        log::info!(
            "{} file(s), {} page(s), {} table(s) in {} ms",
            stats.total_files,
            stats.total_pages,
            stats.total_tables,
            stats.processing_time_ms
        );
    }

    let out = match cli.command.as_str() {
        "extract" => text.to_string(),
        "tables" => {
            let tables = detect_tables(text);
            if let Some(dir) = &cli.csv_dir {
                fs::create_dir_all(dir)?;
                for (i, table) in tables.iter().enumerate() {
                    fs::write(dir.join(format!("table_{}.csv", i + 1)), table_to_csv(table))?;
                }
            }
            if cli.json {
                serde_json::to_string_pretty(&tables)?
            } else {
                tables
                    .iter()
                    .enumerate()
                    .map(|(i, t)| {
                        format!(
                            "Table {} ({} columns, {} rows)\n{}",
                            i + 1,
                            t.num_cols(),
                            t.num_rows(),
                            table_to_csv(t)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n\n")
            }
        }
        "keywords" => {
            let keywords = extract_keywords(text, cli.count);
            if cli.json {
                serde_json::to_string_pretty(&keywords)?
            } else {
                keywords
                    .iter()
                    .map(|k| format!("{:<20} {:>5} {:.4}", k.word, k.frequency, k.score))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        "summary" => {
            let result = generate_summary(text, cli.percent);
            if cli.json {
                serde_json::to_string_pretty(&result)?
            } else {
                format!(
                    "{}\n\n{} of {} words ({}%)",
                    result.summary,
                    result.stats.summary_words,
                    result.stats.original_words,
                    result.stats.compression_ratio
                )
            }
        }
        "search" => {
            let matches = search(text, &cli.positional[0], &cli.search);
            if cli.highlight {
                highlight(text, &matches, matches.first().map(|_| 0))
            } else if cli.json {
                serde_json::to_string_pretty(&matches)?
            } else {
                matches
                    .iter()
                    .map(|m| format!("{}\t{}..{}\t{}", m.index + 1, m.start, m.end, m.text))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        "replace" => replace_all(text, &cli.positional[0], &cli.positional[1], &cli.search),
        "segment" => {
            let kind = if cli.sentences {
                SegmentKind::Sentences
            } else {
                SegmentKind::Paragraphs
            };
            let result = segment(text, kind);
            if cli.json {
                serde_json::to_string_pretty(&result)?
            } else {
                result
                    .segments
                    .iter()
                    .map(|s| format!("[{}] ({} words) {}", s.id, s.word_count, s.content))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        "format" => pdf_lens::converters::format(text, &cli.format),
        "stats" => {
            let stats = analyze(text);
            if cli.json {
                serde_json::to_string_pretty(&stats)?
            } else {
                format!(
                    "Words: {}\nCharacters: {}\nSentences: {}\nParagraphs: {}\nLines: {}\n\
                     Reading time: {} min\nLanguage: {}",
                    stats.words,
                    stats.characters,
                    stats.sentences,
                    stats.paragraphs,
                    stats.lines,
                    stats.reading_time_minutes,
                    stats.detected_language
                )
            }
        }
        "metadata" => loaded
            .files
            .iter()
            .map(|f| format!("{}\n{}", f.name, describe(metadata_or_none(&f.data).as_ref())))
            .collect::<Vec<_>>()
            .join("\n\n"),
        "export" => {
            let format: ExportFormat = cli.export_format.as_deref().unwrap_or("txt").parse()?;
            let files = loaded.files.len().max(cli.inputs.len());
            export(doc, format, files, &analyze(text))?
        }
        other => return Err(format!("unknown command '{}'\n\n{}", other, USAGE).into()),
    };
    Ok(out)
}

fn main() {
    env_logger::init();

    let cli = match CliArgs::from_args() {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    };

    match run(&cli) {
        Ok(out) => {
            let written = match &cli.output {
                Some(path) => fs::write(path, &out),
                None => writeln!(std::io::stdout(), "{}", out),
            };
            if let Err(e) = written {
                eprintln!("Error writing output: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
