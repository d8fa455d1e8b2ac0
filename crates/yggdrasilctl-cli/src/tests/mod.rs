//! Runtime tests exercising the CLI against a fake admin socket.

mod support;
