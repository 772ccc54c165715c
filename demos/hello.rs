//! Hello Example - bootstrap a minimal application.
//!
//! Demonstrates the full startup sequence: build the host document with its
//! `root` mount point, prepare the localization service, bootstrap with a
//! strict-mode development profile, and inspect the rendered output.
//!
//! Run with: cargo run --example hello

use ember_shell::{
    bootstrap, AppConfig, Bundle, BufferSurface, Cleanup, Document, Locale, Localizer,
    Profile, Scope, TextProps,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Host contract: the `root` element exists before bootstrap runs.
    let document = Document::with_root_element("root").into_shared();

    let mut localizer = Localizer::new(Locale::new("en"));
    localizer.add_bundle(Bundle::new("en").message("app.title", "My App"));
    localizer.add_bundle(Bundle::new("pt-BR").message("app.title", "Meu App"));
    let localizer = localizer.into_shared();

    // The root component: renders the localized application title.
    let app = |scope: &mut Scope| -> Cleanup {
        scope.text(TextProps {
            content: scope.localized("app.title"),
            ..Default::default()
        })
    };

    // A buffer surface keeps the demo terminal-friendly; swap in
    // TerminalSurface::new()? for a real screen.
    let surface = BufferSurface::new(80);
    let output = surface.clone();

    let config = AppConfig::default().with_profile(Profile::Development);
    let handle = bootstrap(&document, &localizer, app, surface, &config)?;

    println!("rendered: {}", output.text());

    // Switch locale; the render effect repaints.
    localizer.borrow().set_locale(Locale::with_region("pt", "BR"));
    spark_signals::flush_sync();
    println!("rendered: {}", output.text());

    handle.unmount();
    Ok(())
}
