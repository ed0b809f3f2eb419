pub mod footer;
pub mod header;
pub mod not_found;

use crate::shared::error_boundary::RouteErrorBoundary;
use footer::Footer;
use header::Header;
use leptos::prelude::*;

pub use not_found::NotFound;

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |                 Header                   |
/// +------------------------------------------+
/// |      route content (error boundary)      |
/// +------------------------------------------+
/// |                 Footer                   |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell(children: ChildrenFn) -> impl IntoView {
    view! {
        <div class="app-layout">
            <Header />
            <main class="app-main">
                <RouteErrorBoundary>{children()}</RouteErrorBoundary>
            </main>
            <Footer />
        </div>
    }
}
