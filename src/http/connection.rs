use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::files::handler::RequestHandler;
use crate::http::parser::{self, MAX_REQUEST_BYTES, ParseError};
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;

/// One client connection, driven as an explicit state machine.
///
/// Generic over the stream so tests can run it over an in-memory duplex
/// pipe instead of a TCP socket.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    handler: RequestHandler,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, bool), // bool = persistent?
    Closed,
}

/// How one read cycle ended. Transport and protocol faults are absorbed
/// here into a status code; they become a response, not an error.
enum ReadOutcome {
    Eof,
    Request(Request),
    Fault(StatusCode),
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: RequestHandler) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
            handler,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    match self.read_request().await {
                        ReadOutcome::Request(req) => {
                            self.state = ConnectionState::Processing(req);
                        }
                        ReadOutcome::Fault(status) => {
                            // A request we could not even parse still gets a
                            // well-formed answer; with no negotiated version
                            // the connection closes after it.
                            let response =
                                Response::assemble(status, 1, "/index.html", Vec::new());
                            let writer = ResponseWriter::new(&response);
                            self.state = ConnectionState::Writing(writer, false);
                        }
                        ReadOutcome::Eof => {
                            tracing::debug!("Connection closed by peer");
                            self.state = ConnectionState::Closed;
                        }
                    }
                }

                ConnectionState::Processing(req) => {
                    let response = self.handler.handle(req).await;
                    let persistent = req.persistent();

                    // HEAD computes the body for its length but never
                    // puts it on the wire.
                    let writer = if req.method == Method::HEAD {
                        ResponseWriter::headers_only(&response)
                    } else {
                        ResponseWriter::new(&response)
                    };
                    self.state = ConnectionState::Writing(writer, persistent);
                }

                ConnectionState::Writing(writer, persistent) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if *persistent {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> ReadOutcome {
        self.buffer.clear();

        // Liveness probe: block on a single byte to learn whether the
        // peer is still there before committing to a request cycle.
        let mut probe = [0u8; 1];
        match self.stream.read(&mut probe).await {
            Ok(0) => return ReadOutcome::Eof,
            Ok(_) => self.buffer.extend_from_slice(&probe),
            Err(_) => return ReadOutcome::Fault(StatusCode::ServerError),
        }

        loop {
            // Try parsing whatever we already have
            match parser::parse_request(&self.buffer) {
                Ok((req, _consumed)) => {
                    // Keep reading toward the declared body length until it
                    // arrives or the cap cuts it off.
                    if req.body.len() >= req.content_length
                        || self.buffer.len() >= MAX_REQUEST_BYTES
                    {
                        return ReadOutcome::Request(req);
                    }
                }

                Err(ParseError::Incomplete) => {
                    if self.buffer.len() >= MAX_REQUEST_BYTES {
                        // Headers never terminated within the cap.
                        return ReadOutcome::Fault(StatusCode::BadRequest);
                    }
                    // Need more data → fall through to read
                }

                Err(_) => {
                    // Malformed request → protocol fault
                    return ReadOutcome::Fault(StatusCode::BadRequest);
                }
            }

            // Read more data
            let n = match self.stream.read_buf(&mut self.buffer).await {
                Ok(n) => n,
                Err(_) => return ReadOutcome::Fault(StatusCode::ServerError),
            };

            if n == 0 {
                // Stream ended mid-request: answer with whatever parsed,
                // or flag an unparseable fragment.
                return match parser::parse_request(&self.buffer) {
                    Ok((req, _)) => ReadOutcome::Request(req),
                    Err(_) => ReadOutcome::Fault(StatusCode::BadRequest),
                };
            }

            if self.buffer.len() > MAX_REQUEST_BYTES {
                self.buffer.truncate(MAX_REQUEST_BYTES);
            }
        }
    }
}
