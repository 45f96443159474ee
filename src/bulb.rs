//! Individual bulb control over a persistent TCP session.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use serde_json::{Value, json};

use crate::connection::Connection;
use crate::errors::Error;
use crate::flow::Flow;
use crate::history::{MessageHistory, MessageType};
use crate::protocol::{Command, PROPS_METHOD, Response};
use crate::runtime::Mutex;
use crate::types::{Color, PowerMode};

type Result<T> = std::result::Result<T, Error>;

/// Represents a single Yeelight smart bulb.
///
/// A `Bulb` holds one TCP session to the device, opened lazily on the first
/// command and reopened transparently on the call after a socket fault. The
/// bulb interleaves unsolicited `"props"` state pushes with command replies
/// on the same socket; [`send_command`](Bulb::send_command) skips the pushes
/// and returns the first actual reply.
///
/// Commands take `&mut self`: the protocol allows one command in flight per
/// session, and the exclusive borrow enforces it. Wrap the bulb in an async
/// mutex to share it across tasks.
///
/// # Example
///
/// ```no_run
/// use yeelight_rs::Bulb;
///
/// # async fn example() -> Result<(), yeelight_rs::Error> {
/// let mut bulb = Bulb::new("192.168.1.103");
/// bulb.set_rgb(255, 0, 0).await?;
/// bulb.power_on().await?;
/// # Ok(())
/// # }
/// ```
pub struct Bulb {
    host: String,
    port: u16,
    timeout: Duration,
    cmd_id: u64,
    connection: Option<Connection>,
    history: Arc<Mutex<MessageHistory>>,
}

impl Bulb {
    /// TCP port the device listens on by default.
    pub const DEFAULT_PORT: u16 = 55443;
    /// Bound applied to connect and to every socket read and write.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a bulb at `host` with the default port and timeout.
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_options(host, Self::DEFAULT_PORT, Self::DEFAULT_TIMEOUT)
    }

    /// Create a bulb with an explicit port and I/O timeout.
    pub fn with_options(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Bulb {
            host: host.into(),
            port,
            timeout,
            cmd_id: 0,
            connection: None,
            history: Arc::new(Mutex::new(MessageHistory::new())),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn history(&self) -> MessageHistory {
        self.history.lock().await.clone()
    }

    pub async fn clear_history(&self) {
        self.history.lock().await.clear();
    }

    /// Send a raw command and return the bulb's reply.
    ///
    /// The reply is whatever non-push frame arrives first: a `result` payload,
    /// the bulb's own `error` payload (passed through verbatim), or one of two
    /// synthetic payloads: `{"result": ["invalid command"]}` for a frame that
    /// would not decode, and `{"error": "Bulb closed the connection."}` when
    /// the socket died mid-read. Only failures on the outbound path (connect,
    /// send) surface as `Err`; the session is torn down either way and the
    /// next call reconnects.
    pub async fn send_command(
        &mut self,
        method: &str,
        params: Option<Vec<Value>>,
    ) -> Result<Response> {
        let id = self.next_cmd_id();
        let command = Command::new(id, method, params);
        let line = serde_json::to_string(&command).map_err(Error::JsonDump)?;

        self.history.lock().await.record(
            MessageType::Send,
            method,
            &serde_json::to_value(&command).map_err(Error::JsonDump)?,
        );

        // The connection leaves its slot for the duration of the call and is
        // only put back once healthy; every error path below drops it, so the
        // next command starts from a fresh connect.
        let mut conn = match self.connection.take() {
            Some(conn) => conn,
            None => Connection::open(&self.host, self.port, self.timeout)
                .await
                .map_err(|err| Error::socket("connect", err))?,
        };

        debug!("-> {}", line);
        if let Err(err) = conn.send_line(&line).await {
            self.history.lock().await.record_error(&err.to_string());
            return Err(Error::socket("send", err));
        }

        let reply = loop {
            let raw = match conn.read_line().await {
                Ok(raw) => raw,
                Err(err) => {
                    debug!("read failed, dropping connection: {}", err);
                    self.history.lock().await.record_error(&err.to_string());
                    return Ok(Response::connection_closed());
                }
            };

            let frame: Value = match serde_json::from_slice(&raw) {
                Ok(frame) => frame,
                Err(_) => {
                    debug!("undecodable frame: {}", String::from_utf8_lossy(&raw));
                    break Response::invalid_command();
                }
            };

            if frame.get("method").and_then(Value::as_str) == Some(PROPS_METHOD) {
                debug!("skipping state push: {}", frame);
                self.history
                    .lock()
                    .await
                    .record(MessageType::Push, PROPS_METHOD, &frame);
                continue;
            }

            match serde_json::from_value(frame) {
                Ok(reply) => break reply,
                Err(_) => break Response::invalid_command(),
            }
        };

        debug!("<- {:?}", reply);
        self.history.lock().await.record(
            MessageType::Receive,
            method,
            &serde_json::to_value(&reply).unwrap_or(Value::Null),
        );
        self.connection = Some(conn);
        Ok(reply)
    }

    /// Get the device name.
    pub async fn name(&mut self) -> Result<String> {
        let reply = self.send_command("get_prop", Some(vec![json!("name")])).await?;
        let result = expect_result("get_prop", reply)?;
        result
            .first()
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::MissingResult("get_prop".to_string()))
    }

    /// Set the device name.
    pub async fn set_name(&mut self, name: &str) -> Result<()> {
        let reply = self.send_command("set_name", Some(vec![json!(name)])).await?;
        ensure_ok(reply).map(|_| ())
    }

    /// Whether the bulb is currently on.
    pub async fn is_on(&mut self) -> Result<bool> {
        let reply = self.send_command("get_prop", Some(vec![json!("power")])).await?;
        let result = expect_result("get_prop", reply)?;
        Ok(result.first().and_then(Value::as_str) == Some("on"))
    }

    /// Set the power state.
    pub async fn set_power(&mut self, mode: PowerMode) -> Result<()> {
        let reply = self
            .send_command("set_power", Some(vec![json!(mode.as_param())]))
            .await?;
        ensure_ok(reply).map(|_| ())
    }

    /// Turn the bulb on.
    pub async fn power_on(&mut self) -> Result<()> {
        self.set_power(PowerMode::On).await
    }

    /// Turn the bulb off.
    pub async fn power_off(&mut self) -> Result<()> {
        self.set_power(PowerMode::Off).await
    }

    /// Flip the power state, returning the state the bulb was switched to.
    pub async fn toggle(&mut self) -> Result<PowerMode> {
        let current = if self.is_on().await? {
            PowerMode::On
        } else {
            PowerMode::Off
        };
        let target = current.flipped();
        self.set_power(target).await?;
        Ok(target)
    }

    /// Set the bulb's RGB color. Each channel is clamped to 0-255 before
    /// packing into the protocol's single-integer form.
    pub async fn set_rgb(&mut self, red: i64, green: i64, blue: i64) -> Result<()> {
        let color = Color::clamped(red, green, blue);
        let reply = self
            .send_command("set_rgb", Some(vec![json!(color.packed())]))
            .await?;
        ensure_ok(reply).map(|_| ())
    }

    /// Start playing a flow on the bulb.
    pub async fn start_flow(&mut self, flow: &Flow) -> Result<()> {
        let reply = self
            .send_command(
                "start_cf",
                Some(vec![
                    json!(flow.count()),
                    json!(flow.action().id()),
                    json!(flow.expression()),
                ]),
            )
            .await?;
        ensure_ok(reply).map(|_| ())
    }

    /// Next command id in sequence. Increments on every call, including calls
    /// whose command later fails; ids never reset for the lifetime of the bulb.
    fn next_cmd_id(&mut self) -> u64 {
        let id = self.cmd_id;
        self.cmd_id += 1;
        id
    }
}

/// Surface a device `error` payload as [`Error::Bulb`], pass anything else
/// through.
fn ensure_ok(reply: Response) -> Result<Response> {
    match reply.error {
        Some(err) => Err(Error::Bulb(err)),
        None => Ok(reply),
    }
}

/// Like [`ensure_ok`], but the caller needs the `result` array.
fn expect_result(method: &str, reply: Response) -> Result<Vec<Value>> {
    if let Some(err) = reply.error {
        return Err(Error::Bulb(err));
    }
    reply
        .result
        .ok_or_else(|| Error::MissingResult(method.to_string()))
}
