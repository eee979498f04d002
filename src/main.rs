//! Bingo Card Scanner
//!
//! Reads a photographed bingo card, sends it to the cloud OCR provider, and
//! interprets the detected text fragments into a validated 5x5 card with
//! odd/even counts.

mod card;
mod error;
mod paths;
mod vision;

use anyhow::{Context, Result, anyhow};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

use card::ScanConfig;
use card::model::{COLUMN_LETTERS, Card, FREE_COL, FREE_ROW, GRID_SIZE};
use error::ScanError;
use vision::{AnnotationSource, VisionClient};

const API_KEY_ENV: &str = "VISION_API_KEY";

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join("bingo_scan.log");
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) {
        let _ = file.write_all(line.as_bytes());
    }
}

fn main() -> Result<()> {
    let image_path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("usage: bingo-scan <image-path>"))?;
    let api_key = std::env::var(API_KEY_ENV)
        .map_err(|_| anyhow!("{} is not set", API_KEY_ENV))?;

    paths::ensure_directories()?;
    let config_path = paths::get_config_path();
    if !config_path.exists() {
        // Write the defaults once so thresholds are visible and editable
        let _ = ScanConfig::save_default(&config_path);
    }
    let config = ScanConfig::load(&config_path);

    let bytes =
        std::fs::read(&image_path).with_context(|| format!("reading {}", image_path))?;
    // Reject undecodable payloads before spending provider quota on them
    image::load_from_memory(&bytes).map_err(ScanError::from)?;
    let payload = BASE64.encode(&bytes);

    log(&format!(
        "Submitting {} ({} bytes) for OCR",
        image_path,
        bytes.len()
    ));

    let client = VisionClient::new(api_key, config.max_results, config.request_timeout_secs)?;
    let fragments = client.annotate(&payload)?;
    log(&format!("Provider returned {} fragments", fragments.len()));

    let card = card::analyze(&fragments, &config)?;
    print_card(&card);

    if card.is_low_detection(config.low_detection_threshold) {
        log(&format!(
            "Warning: only {} of 24 numbers detected; results may be unreliable",
            card.total_numbers
        ));
    }

    Ok(())
}

/// Prints the resolved card as a plain-text grid with summary counts.
fn print_card(card: &Card) {
    let mut cells: Vec<Vec<String>> = vec![vec!["--".to_string(); GRID_SIZE]; GRID_SIZE];
    for n in &card.numbers {
        cells[n.row][n.col] = n.value.to_string();
    }
    cells[FREE_ROW][FREE_COL] = card
        .free_space_content
        .clone()
        .unwrap_or_else(|| "FREE".to_string());

    let header: Vec<String> = COLUMN_LETTERS.iter().map(|c| format!("{:>6}", c)).collect();
    println!("{}", header.join(" "));
    for row in &cells {
        let line: Vec<String> = row.iter().map(|c| format!("{:>6}", c)).collect();
        println!("{}", line.join(" "));
    }
    println!(
        "odds: {}  evens: {}  total: {}  confidence: {:.2}",
        card.odds_count, card.evens_count, card.total_numbers, card.confidence
    );
}
