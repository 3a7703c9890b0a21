//! Icon command handler.

use navdash_core::{CoreError, IconData, Route, Store};

use crate::cli::{GlobalOpts, IconArgs};
use crate::error::CliError;
use crate::output::{self, Palette};

use super::enter;

pub async fn handle(
    store: &mut Store,
    args: IconArgs,
    global: &GlobalOpts,
    palette: Palette,
) -> Result<(), CliError> {
    enter(store, Route::Edit).await?;
    let data_uri = store.fetch_icon(&args.url).await?;

    let Some(out) = args.out else {
        output::print_output(&data_uri, global.quiet);
        return Ok(());
    };

    let icon = IconData::parse(&data_uri).map_err(CoreError::from)?;
    let path = if out.is_dir() {
        out.join(format!("icon.{}", icon.extension()))
    } else {
        out
    };
    std::fs::write(&path, &icon.bytes)?;

    output::print_status(
        &palette.ok(&format!(
            "✓ Wrote {} ({} bytes, {})",
            path.display(),
            icon.bytes.len(),
            icon.mime_type
        )),
        global.quiet,
    );
    Ok(())
}
