use std::io::{self, BufRead};
use std::net::Ipv4Addr;

use console::Term;
use dialoguer::Input;
use tracing::{debug, info};

use crate::api::client::BridgeClient;
use crate::error::AppError;
use crate::models::pairing::{parse_pairing_result, Credential, PairingError};

/// Operator interaction needed while pairing.
pub trait OperatorPrompt {
    /// Ask for the bridge's network address.
    fn bridge_address(&mut self) -> Result<String, AppError>;

    /// Block until the operator says the link button has been pressed.
    fn await_link_button(&mut self) -> Result<(), AppError>;
}

fn validate_ipv4(input: &str) -> Result<(), &'static str> {
    input
        .trim()
        .parse::<Ipv4Addr>()
        .map(|_| ())
        .map_err(|_| "not a valid IPv4 address")
}

/// Prompts on the controlling terminal, or reads plain lines from stdin when
/// stderr is not a terminal (dialoguer renders its prompts there).
pub struct TerminalPrompt;

impl OperatorPrompt for TerminalPrompt {
    fn bridge_address(&mut self) -> Result<String, AppError> {
        if !Term::stderr().is_term() {
            return LinePrompt::new(io::stdin().lock()).bridge_address();
        }

        let address: String = Input::new()
            .with_prompt("Hue bridge IP")
            .validate_with(|input: &String| validate_ipv4(input))
            .interact_text()
            .map_err(|e| AppError::Prompt(e.to_string()))?;
        Ok(address.trim().to_string())
    }

    fn await_link_button(&mut self) -> Result<(), AppError> {
        if !Term::stderr().is_term() {
            return LinePrompt::new(io::stdin().lock()).await_link_button();
        }

        let _: String = Input::new()
            .with_prompt("Press Enter to continue")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AppError::Prompt(e.to_string()))?;
        Ok(())
    }
}

/// Line-based prompt over any reader.
pub struct LinePrompt<R> {
    reader: R,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Next line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, AppError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead> OperatorPrompt for LinePrompt<R> {
    fn bridge_address(&mut self) -> Result<String, AppError> {
        eprint!("Hue bridge IP: ");
        let address = self
            .read_line()?
            .ok_or_else(|| AppError::Prompt("no bridge address on standard input".into()))?;
        validate_ipv4(&address)
            .map_err(|e| AppError::InvalidInput(format!("{}: {:?}", e, address)))?;
        Ok(address)
    }

    fn await_link_button(&mut self) -> Result<(), AppError> {
        // The line is only a gate; its content and end of input are ignored.
        self.read_line()?;
        Ok(())
    }
}

/// Register with the bridge, waiting once for the link button if needed.
///
/// The first attempt either succeeds or reports that the link button has not
/// been pressed. In the latter case the operator is asked to press it and a
/// single second attempt is made; its failure is final. If the operator never
/// confirms, this blocks indefinitely.
pub async fn pair<P: OperatorPrompt>(
    client: &BridgeClient,
    prompt: &mut P,
) -> Result<Credential, AppError> {
    debug!(bridge = client.base_url(), "registering application");
    match parse_pairing_result(&client.register_client().await?) {
        Ok(credential) => return Ok(credential),
        Err(PairingError::LinkButtonNotPressed) => {}
        Err(e) => return Err(e.into()),
    }

    eprintln!("Please press the link button on the Hue bridge, then press Enter...");
    prompt.await_link_button()?;

    let credential = parse_pairing_result(&client.register_client().await?)?;
    info!("paired with bridge");
    Ok(credential)
}
