/**
 * Signal Link
 *
 * Ships packed signal words to the actuator controller. The controller
 * side only needs the framed u32; the marker inside the word is checked
 * again on its end.
 */

pub mod protocol;
pub use protocol::*;

use std::io::Write;
use std::time::Duration;
use serialport::SerialPort;
use tracing::debug;

/// Anything that can take a packed signal word downstream
pub trait SignalSink: Send{
    fn send_signal(&mut self, word: u32) -> std::io::Result<()>;
}

pub struct SerialLink{
    port: Box<dyn SerialPort>,
}

impl SerialLink{
    pub fn open(port_name: &str, baud_rate: u32) -> Result<Self, serialport::Error>{
        let port = serialport::new(port_name, baud_rate)
            .timeout(Duration::from_millis(10))
            .open()?;

        debug!(port = port_name, baud_rate, "serial link open");

        Ok(SerialLink{ port })
    }
}

impl SignalSink for SerialLink{
    fn send_signal(&mut self, word: u32) -> std::io::Result<()>{
        self.port.write_all(&encode_signal(word))?;
        self.port.flush()
    }
}
