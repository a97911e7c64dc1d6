//! Direct streaming with HTTP range requests.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap},
    response::Response,
};
use tokio_util::io::ReaderStream;
use vidstream_common::{Error, VideoId};

use super::{resolve_range, ChunkedTransmitter, ResponsePlan};
use crate::server::{error::AppError, AppContext};

/// Stream a video, whole or by byte range.
///
/// The file is opened and positioned before the response is built, so open,
/// stat and seek failures still produce an error status. The copy itself runs
/// in its own task that owns the file handle; the response body is the read
/// half of a one-chunk pipe, which gives per-chunk back-pressure and makes a
/// client disconnect show up as a failed write.
pub async fn watch(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let id: VideoId = id.parse()?;

    let path = ctx.source.resolve(&id)?;
    let target = ctx.source.open(&path).await?;

    let range_header = headers
        .get(header::RANGE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
    let request = resolve_range(range_header.as_deref(), target.length);
    let plan = ResponsePlan::new(target.length, &request, ctx.content_type.clone());

    tracing::debug!(
        video_id = %id,
        range = ?range_header,
        status = %plan.status(),
        content_length = plan.content_length(),
        "Planned stream response"
    );

    let Some(span) = plan.span() else {
        return Ok(plan.into_response(Body::empty()));
    };

    let mut handle = target.handle;
    let transmitter = ChunkedTransmitter::new(ctx.chunk_size);
    transmitter
        .seek(&mut handle, span)
        .await
        .map_err(|e| Error::internal(format!("Seek failed in {}: {e}", path.display())))?;

    let (mut writer, reader) = tokio::io::duplex(transmitter.chunk_size());
    tokio::spawn(async move {
        let report = transmitter.run(&mut handle, span, &mut writer).await;
        report.log(id.as_str());
        // Dropping `handle` closes the file.
    });

    let body = Body::from_stream(ReaderStream::with_capacity(reader, transmitter.chunk_size()));
    Ok(plan.into_response(body))
}
