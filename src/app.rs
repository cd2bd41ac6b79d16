use leptos::prelude::*;
use leptos_fetch::QueryClient;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    path, StaticSegment,
};

use crate::api::client::ApiClient;
use crate::auth::guard::{GuestOnly, RequireAuth};
use crate::auth::session::SessionProvider;
use crate::components::layout::Layout;
use crate::pages::dashboard::DashboardPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::order_form::{OrderCreatePage, OrderEditPage};
use crate::pages::orders::OrdersPage;
use crate::pages::password_reset::PasswordResetPage;
use crate::pages::pen_form::{PenCreatePage, PenEditPage};
use crate::pages::pens::PensPage;
use crate::pages::profile::ProfilePage;
use crate::pages::register::RegisterPage;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    QueryClient::new().provide();

    // One client for the whole tree; the session layer reacts to the
    // unauthorized signal it carries.
    let unauthorized = RwSignal::new(0u32);
    let client = ApiClient::from_env().with_unauthorized_signal(unauthorized);
    provide_context(client);

    view! {
        <Title text="penstand"/>
        <Router>
            <SessionProvider>
                <Layout>
                    <main>
                        <Routes fallback=|| "Page not found.".into_view()>
                            <Route path=StaticSegment("") view=HomePage/>
                            <Route
                                path=path!("login")
                                view=|| view! { <GuestOnly><LoginPage/></GuestOnly> }
                            />
                            <Route
                                path=path!("register")
                                view=|| view! { <GuestOnly><RegisterPage/></GuestOnly> }
                            />
                            <Route
                                path=path!("password-reset/:token")
                                view=|| view! { <GuestOnly><PasswordResetPage/></GuestOnly> }
                            />
                            <Route
                                path=path!("dashboard")
                                view=|| view! { <RequireAuth><DashboardPage/></RequireAuth> }
                            />
                            <Route
                                path=path!("pens")
                                view=|| view! { <RequireAuth><PensPage/></RequireAuth> }
                            />
                            <Route
                                path=path!("pens/create")
                                view=|| view! { <RequireAuth><PenCreatePage/></RequireAuth> }
                            />
                            <Route
                                path=path!("pens/edit/:id")
                                view=|| view! { <RequireAuth><PenEditPage/></RequireAuth> }
                            />
                            <Route
                                path=path!("orders")
                                view=|| view! { <RequireAuth><OrdersPage/></RequireAuth> }
                            />
                            <Route
                                path=path!("orders/create")
                                view=|| view! { <RequireAuth><OrderCreatePage/></RequireAuth> }
                            />
                            <Route
                                path=path!("orders/edit/:id")
                                view=|| view! { <RequireAuth><OrderEditPage/></RequireAuth> }
                            />
                            <Route
                                path=path!("profile")
                                view=|| view! { <RequireAuth><ProfilePage/></RequireAuth> }
                            />
                        </Routes>
                    </main>
                </Layout>
            </SessionProvider>
        </Router>
    }
}
