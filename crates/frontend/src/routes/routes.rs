use crate::domain::a001_wb_order::ui::form::WbOrderFormPage;
use crate::domain::a001_wb_order::ui::list::WbOrdersAdminPage;
use crate::layout::{NotFound, Shell};
use crate::system::auth::{RedirectIfAuthenticated, RequireAdmin};
use crate::system::pages::{HomePage, LoginPage, SignupPage};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/wb-order") view=WbOrderFormPage />
                    <Route
                        path=path!("/admin/wb-orders")
                        view=|| view! {
                            <RequireAdmin>
                                <WbOrdersAdminPage />
                            </RequireAdmin>
                        }
                    />
                    <Route
                        path=path!("/login")
                        view=|| view! {
                            <RedirectIfAuthenticated>
                                <LoginPage />
                            </RedirectIfAuthenticated>
                        }
                    />
                    <Route
                        path=path!("/signup")
                        view=|| view! {
                            <RedirectIfAuthenticated>
                                <SignupPage />
                            </RedirectIfAuthenticated>
                        }
                    />
                </Routes>
            </Shell>
        </Router>
    }
}
