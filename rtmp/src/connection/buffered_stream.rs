use std::io::{self, BufReader, Read, Write};

const READ_BUFFER_SIZE: usize = 4096;

/// A duplex stream whose reads are buffered and whose writes go straight to the inner stream.
///
/// Chunk headers are read a few bytes at a time, so without buffering every field would cost
/// a read on the socket.
pub(crate) struct BufferedStream<S: Read + Write> {
    inner: BufReader<S>,
}

impl<S: Read + Write> BufferedStream<S> {
    pub fn new(stream: S) -> BufferedStream<S> {
        BufferedStream {
            inner: BufReader::with_capacity(READ_BUFFER_SIZE, stream),
        }
    }

    pub fn get_ref(&self) -> &S {
        self.inner.get_ref()
    }
}

impl<S: Read + Write> Read for BufferedStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<S: Read + Write> Write for BufferedStream<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.get_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.get_mut().flush()
    }
}
