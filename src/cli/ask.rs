use std::io::Write;

use crate::chat::{ChatSession, EchoView};
use crate::core::{CompletionSource, Result};

/// Streams one reply to `out` as it arrives, then ends the line. Text
/// received before a failure stays written.
pub async fn run_ask<S, W>(source: &S, prompt: &str, out: &mut W) -> Result<()>
where
    S: CompletionSource + ?Sized,
    W: Write + Send,
{
    let mut session = ChatSession::new();
    let mut view = EchoView::new(&mut *out);

    let result = session.submit(source, prompt, &mut view).await;

    writeln!(out)?;
    out.flush()?;
    result?;
    Ok(())
}
