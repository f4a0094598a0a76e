//! Download infrastructure for distributions.
//!
//! - reqwest blocking client for HTTP
//! - body streamed in chunks with simple MB progress on stdout

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::time::Duration;

/// Transfers a URL's body into a writer.
pub trait Download {
    /// Stream the body of `url` into `out`, returning the byte count.
    fn download(&self, url: &str, out: &mut dyn Write) -> Result<u64>;
}

/// Plain HTTPS GET without retry or checksum.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    connect_timeout: Duration,
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl HttpDownloader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Download for HttpDownloader {
    fn download(&self, url: &str, out: &mut dyn Write) -> Result<u64> {
        // Distributions run to 100+ MB, so only the connect phase is bounded.
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("kirok-cli/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(self.connect_timeout)
            .timeout(None::<Duration>)
            .build()?;

        let response = client
            .get(url)
            .send()
            .with_context(|| format!("Failed to GET {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP {}: {}", response.status(), url);
        }

        let total_size = response.content_length();
        let mut downloaded: u64 = 0;
        let mut response = response;

        let mut buffer = [0u8; 8192];
        loop {
            let bytes_read = response
                .read(&mut buffer)
                .with_context(|| format!("Failed reading body of {}", url))?;
            if bytes_read == 0 {
                break;
            }

            out.write_all(&buffer[..bytes_read])?;
            downloaded += bytes_read as u64;

            print_progress(downloaded, total_size);
        }

        println!();
        out.flush()?;
        Ok(downloaded)
    }
}

fn print_progress(downloaded: u64, total_size: Option<u64>) {
    let mb_done = downloaded / (1024 * 1024);
    match total_size {
        Some(total) => print!("\r  {}/{} MB", mb_done, total / (1024 * 1024)),
        None => print!("\r  {} MB", mb_done),
    }
    std::io::stdout().flush().ok();
}
