//! soaldoc CLI - generated exam text conversion tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use soaldoc::{
    ConvertOptions, FrontMatter, OutputFormat, PageSize, ParseOptions, RenderOptions,
    WriterRegistry,
};

#[derive(Parser)]
#[command(name = "soaldoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert generated exam text to DOCX, PDF, Markdown, text, and JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a generated body to a document
    Convert {
        /// Input text file ("-" reads stdin)
        #[arg(value_name = "BODY")]
        input: PathBuf,

        /// Output file (stdout for text formats if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format (defaults to the output extension, else docx)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Institution line
        #[arg(long, env = "SOALDOC_INSTITUTION")]
        institution: Option<String>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Subject line
        #[arg(long, env = "SOALDOC_SUBJECT")]
        subject: Option<String>,

        /// Extra front matter line (repeatable)
        #[arg(long = "line", value_name = "TEXT")]
        lines: Vec<String>,

        /// Front matter JSON file (flags override its fields)
        #[arg(long, value_name = "FILE")]
        front_matter: Option<PathBuf>,

        /// Heading level for heading lines (1-6)
        #[arg(long, default_value = "3")]
        heading_level: u8,

        /// Page size for DOCX and PDF (a4, letter)
        #[arg(long, default_value = "a4")]
        page_size: String,

        /// Include YAML frontmatter in Markdown output
        #[arg(long)]
        yaml: bool,

        /// Fail on malformed tables instead of skipping them
        #[arg(long)]
        strict: bool,

        /// Reject tables wider than this many columns
        #[arg(long, value_name = "N")]
        max_columns: Option<usize>,
    },

    /// Show how a body is classified
    Inspect {
        /// Input text file ("-" reads stdin)
        #[arg(value_name = "BODY")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Word-processor document
    Docx,
    /// PDF document
    Pdf,
    /// Markdown
    #[value(alias = "markdown")]
    Md,
    /// Plain text
    #[value(alias = "text")]
    Txt,
    /// JSON structure
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Docx => OutputFormat::Docx,
            FormatArg::Pdf => OutputFormat::Pdf,
            FormatArg::Md => OutputFormat::Markdown,
            FormatArg::Txt => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Front matter fields gathered from flags.
struct FrontMatterArgs {
    institution: Option<String>,
    title: Option<String>,
    subject: Option<String>,
    lines: Vec<String>,
    file: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            format,
            institution,
            title,
            subject,
            lines,
            front_matter,
            heading_level,
            page_size,
            yaml,
            strict,
            max_columns,
        }) => {
            let fm_args = FrontMatterArgs {
                institution,
                title,
                subject,
                lines,
                file: front_matter,
            };
            cmd_convert(
                &input,
                output.as_deref(),
                format,
                fm_args,
                heading_level,
                &page_size,
                yaml,
                strict,
                max_columns,
            )
        }
        Some(Commands::Inspect { input, json }) => cmd_inspect(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: soaldoc convert <BODY> [-o OUTPUT]".yellow());
            println!("       soaldoc --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    format: Option<FormatArg>,
    fm_args: FrontMatterArgs,
    heading_level: u8,
    page_size: &str,
    yaml: bool,
    strict: bool,
    max_columns: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = read_body(input)?;
    let front_matter = build_front_matter(fm_args)?;
    let format = resolve_format(format, output);

    let page_size = PageSize::parse(page_size).map_err(|e| format!("Invalid page size: {}", e))?;

    let mut parse_options = ParseOptions::new();
    if strict {
        parse_options = parse_options.strict();
    }
    if let Some(limit) = max_columns {
        parse_options = parse_options.with_max_columns(limit);
    }

    let render_options = RenderOptions::new()
        .with_heading_level(heading_level)
        .with_page_size(page_size)
        .with_frontmatter(yaml);

    let options = ConvertOptions::new()
        .with_parse_options(parse_options)
        .with_render_options(render_options)
        .with_format(format);

    let registry = WriterRegistry::with_defaults();
    let result = registry.convert(&body, &front_matter, &options)?;

    if result.stats.skipped_tables > 0 {
        eprintln!(
            "{} {} malformed table(s) skipped",
            "Warning:".yellow().bold(),
            result.stats.skipped_tables
        );
    }

    match output {
        Some(path) => {
            fs::write(path, &result.bytes)?;
            println!(
                "{} {} ({} bytes)",
                "Saved to".green(),
                path.display(),
                result.content_len()
            );
        }
        None if matches!(format, OutputFormat::Docx | OutputFormat::Pdf) => {
            return Err(format!(
                "{} output is binary; use -o to choose an output file",
                format.extension()
            )
            .into());
        }
        None => {
            println!("{}", String::from_utf8_lossy(&result.bytes));
        }
    }

    Ok(())
}

fn cmd_inspect(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let body = read_body(input)?;
    let (blocks, stats) = soaldoc::BodyParser::new().parse(&body)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Body Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Input".bold(), input.display());
    println!("{}: {}", "Lines".bold(), stats.line_count);
    println!("{}: {}", "Blocks".bold(), blocks.len());

    println!();
    println!("{}", "Block Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Table rows".bold(), stats.table_row_count);
    println!("{}: {}", "Separators".bold(), stats.separator_count);
    if stats.skipped_tables > 0 {
        println!(
            "{}: {}",
            "Skipped tables".bold(),
            stats.skipped_tables.to_string().yellow()
        );
    }

    for table in blocks.iter().filter_map(|b| b.as_table()) {
        let shape = format!("{} x {}", table.row_count(), table.column_count());
        if table.is_ragged() {
            println!("  {} {} {}", "├─".dimmed(), shape, "(ragged)".dimmed());
        } else {
            println!("  {} {}", "├─".dimmed(), shape);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "soaldoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Generated exam text to document converter");
    println!();
    println!("License: MIT");
}

fn read_body(input: &Path) -> io::Result<String> {
    if input.as_os_str() == "-" {
        let mut body = String::new();
        io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        fs::read_to_string(input)
    }
}

fn build_front_matter(args: FrontMatterArgs) -> Result<FrontMatter, Box<dyn std::error::Error>> {
    let mut front_matter = match args.file {
        Some(path) => FrontMatter::from_json(&fs::read_to_string(path)?)?,
        None => FrontMatter::default(),
    };

    if let Some(institution) = args.institution {
        front_matter.institution = institution;
    }
    if let Some(title) = args.title {
        front_matter.title = Some(title);
    }
    if let Some(subject) = args.subject {
        front_matter.subject = subject;
    }
    front_matter.extra_lines.extend(args.lines);

    Ok(front_matter)
}

fn resolve_format(format: Option<FormatArg>, output: Option<&Path>) -> OutputFormat {
    if let Some(format) = format {
        return format.into();
    }
    output
        .and_then(|p| p.extension())
        .and_then(|ext| OutputFormat::parse(&ext.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_flags() -> FrontMatterArgs {
        FrontMatterArgs {
            institution: None,
            title: None,
            subject: None,
            lines: Vec::new(),
            file: None,
        }
    }

    #[test]
    fn test_resolve_format() {
        assert_eq!(resolve_format(None, None), OutputFormat::Docx);
        assert_eq!(
            resolve_format(None, Some(Path::new("out/soal.PDF"))),
            OutputFormat::Pdf
        );
        assert_eq!(
            resolve_format(None, Some(Path::new("soal.unknown"))),
            OutputFormat::Docx
        );
        assert_eq!(
            resolve_format(Some(FormatArg::Md), Some(Path::new("soal.pdf"))),
            OutputFormat::Markdown
        );
    }

    #[test]
    fn test_front_matter_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fm.json");
        fs::write(
            &path,
            r#"{"institution": "SMA 1", "subject": "Biologi", "extra_lines": ["Kelas X"]}"#,
        )
        .unwrap();

        let args = FrontMatterArgs {
            subject: Some("Kimia".to_string()),
            lines: vec!["Semester 1".to_string()],
            file: Some(path),
            ..no_flags()
        };
        let fm = build_front_matter(args).unwrap();

        assert_eq!(fm.institution, "SMA 1");
        assert_eq!(fm.subject, "Kimia");
        assert_eq!(fm.extra_lines, vec!["Kelas X", "Semester 1"]);
    }

    #[test]
    fn test_front_matter_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fm.json");
        fs::write(&path, "not json").unwrap();

        let args = FrontMatterArgs {
            file: Some(path),
            ..no_flags()
        };
        assert!(build_front_matter(args).is_err());
    }

    #[test]
    fn test_read_body_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.txt");
        fs::write(&path, "### SOAL\n| 1 | A |").unwrap();
        assert_eq!(read_body(&path).unwrap(), "### SOAL\n| 1 | A |");
    }
}
