mod args;
mod chunking;

use args::Config;
use chunking::{
    chunker::{Chunker, ChunkerError},
    prefix::PrefixChunker,
    writer,
};
use std::{
    io::{self, Write},
    path::PathBuf,
};
use tracing::Level;

fn main() {
    let config = match args::parse_from(std::env::args_os()) {
        Ok(config) => config,
        Err(args_error) => {
            // exit status stays 0 for every diagnostic
            println!("{args_error}");
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(if config.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let result = run(&config, &mut io::stdout().lock());
    if let Err(err) = result {
        tracing::debug!("{err:?}");
        println!("[x] {err}");
    }
}

fn report(output: &mut dyn Write, line: std::fmt::Arguments<'_>) -> Result<(), ChunkerError> {
    writeln!(output, "{line}").map_err(|err| ChunkerError::Write(PathBuf::from("<stdout>"), err))
}

/// Chunks the payload, saves the test cases and writes the summary to `output`.
fn run(config: &Config, output: &mut dyn Write) -> Result<(), ChunkerError> {
    let chunker = PrefixChunker::new(config.step)?
        .legacy_duplicate_final_chunk(config.legacy_duplicate_final_chunk);

    let payload = chunker.read_file(&config.payload_path)?;
    tracing::debug!(
        "Loaded {} bytes from {}, step {}",
        payload.len(),
        config.payload_path.display(),
        chunker.step()
    );

    let test_cases = chunker.chunk(&payload);
    report(output, format_args!("[*] {} test cases generated", test_cases.len()))?;

    if !test_cases.is_empty() {
        let folder = writer::save(&config.folder, &test_cases, config.extension.as_deref())?;
        report(output, format_args!("[*] Test cases saved in: {}", folder.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::Path};
    use tempfile::tempdir;

    fn config(payload_path: &Path, folder: &Path, step: usize) -> Config {
        Config {
            payload_path: payload_path.to_path_buf(),
            step,
            extension: None,
            folder: folder.to_path_buf(),
            legacy_duplicate_final_chunk: true,
            verbose: false,
        }
    }

    #[test]
    fn test_run_empty_payload() {
        let dir = tempdir().unwrap();
        let payload = dir.path().join("empty.bin");
        fs::write(&payload, b"").unwrap();
        let out_dir = dir.path().join("cases");
        fs::create_dir(&out_dir).unwrap();

        let mut output = Vec::new();
        run(&config(&payload, &out_dir, 3), &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "[*] 0 test cases generated\n");
        assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_run_writes_test_cases() {
        let dir = tempdir().unwrap();
        let payload = dir.path().join("payload.exe");
        fs::write(&payload, b"MZ\x90\x00\x03\x00\x00\x00\x04").unwrap();
        let out_dir = dir.path().join("cases");
        fs::create_dir(&out_dir).unwrap();

        let mut output = Vec::new();
        run(&config(&payload, &out_dir, 3), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            format!(
                "[*] 4 test cases generated\n[*] Test cases saved in: {}\n",
                out_dir.display()
            )
        );
        let lengths: Vec<usize> = (0..4)
            .map(|index| fs::read(out_dir.join(format!("test_case_{index}.exe"))).unwrap().len())
            .collect();
        assert_eq!(lengths, vec![3, 6, 9, 9]);
        assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 4);
    }

    #[test]
    fn test_run_missing_payload() {
        let dir = tempdir().unwrap();
        let payload = dir.path().join("missing.bin");

        let mut output = Vec::new();
        match run(&config(&payload, dir.path(), 3), &mut output) {
            Err(ChunkerError::Read(path, _)) => assert_eq!(path, payload),
            other => panic!("expected read error, got {other:?}"),
        }
        assert!(output.is_empty());
    }
}
