use url::Url;

const DRIVE_HOST: &str = "drive.google.com";

/// Rewrites a Google Drive share link to its embeddable `/file/d/<id>/preview` form.
///
/// Recognizes `/d/<id>` anywhere in the path (`/file/d/<id>/view`, `/open/d/<id>`, an
/// existing `/preview` link) and the older `?id=<id>` query form. Returns `None` for
/// anything that is not a parseable Drive link with a file id.
pub fn drive_embed_url(video_url: &str) -> Option<String> {
    if !video_url.contains(DRIVE_HOST) {
        return None;
    }

    let parsed = Url::parse(video_url).ok()?;

    let from_path = parsed.path_segments().and_then(|segments| {
        segments
            .skip_while(|segment| *segment != "d")
            .nth(1)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    });

    let file_id = from_path.or_else(|| {
        parsed
            .query_pairs()
            .find(|(key, value)| key == "id" && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    })?;

    Some(format!("https://{}/file/d/{}/preview", DRIVE_HOST, file_id))
}

/// Normalizes a stored video URL: Drive links become embed links, everything else is
/// kept as submitted (trimmed).
pub fn normalize_video_url(video_url: &str) -> String {
    let trimmed = video_url.trim();
    match drive_embed_url(trimmed) {
        Some(embed) => {
            tracing::debug!(original = %trimmed, embed = %embed, "Rewrote Drive link");
            embed
        }
        None => trimmed.to_string(),
    }
}
