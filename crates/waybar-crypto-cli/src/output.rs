use std::io::Write;

use waybar_crypto_core::RenderResult;

use crate::error::CliError;

/// Write `result` to stdout as a single JSON document followed by a newline.
pub fn write(result: &RenderResult, pretty: bool) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    write_to(&mut lock, result, pretty)?;
    lock.flush()?;
    Ok(())
}

fn write_to<W: Write>(writer: &mut W, result: &RenderResult, pretty: bool) -> Result<(), CliError> {
    let body = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    writeln!(writer, "{body}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RenderResult {
        RenderResult {
            text: String::from("₿ $1.00"),
            tooltip: String::new(),
            class: String::from("crypto"),
        }
    }

    #[test]
    fn compact_output_is_one_line() {
        let mut buffer = Vec::new();
        write_to(&mut buffer, &sample(), false).expect("write succeeds");
        let text = String::from_utf8(buffer).expect("utf-8");
        assert_eq!(
            text,
            "{\"text\":\"₿ $1.00\",\"tooltip\":\"\",\"class\":\"crypto\"}\n"
        );
    }

    #[test]
    fn pretty_output_round_trips() {
        let mut buffer = Vec::new();
        write_to(&mut buffer, &sample(), true).expect("write succeeds");
        let parsed: RenderResult = serde_json::from_slice(&buffer).expect("valid json");
        assert_eq!(parsed, sample());
    }
}
