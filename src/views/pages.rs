use askama::Template;

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub title: String,
    pub authenticated: bool,
}

/// The four entry pages under `/auth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPage {
    Login,
    SignUp,
    ForgotPassword,
    UpdatePassword,
}

impl AuthPage {
    pub fn title(&self) -> &'static str {
        match self {
            AuthPage::Login => "Log in",
            AuthPage::SignUp => "Sign up",
            AuthPage::ForgotPassword => "Reset your password",
            AuthPage::UpdatePassword => "Update your password",
        }
    }

    fn blurb(&self) -> &'static str {
        match self {
            AuthPage::Login => "Sign in with your identity provider to view your analytics.",
            AuthPage::SignUp => "Create an account with your identity provider to get started.",
            AuthPage::ForgotPassword => "Request a reset link from your identity provider.",
            AuthPage::UpdatePassword => "Choose a new password with your identity provider.",
        }
    }
}

#[derive(Template)]
#[template(path = "auth.html")]
pub struct AuthPageTemplate {
    pub title: String,
    pub blurb: String,
    pub show_login_link: bool,
}

impl AuthPageTemplate {
    pub fn new(page: AuthPage) -> Self {
        Self {
            title: page.title().to_string(),
            blurb: page.blurb().to_string(),
            show_login_link: page != AuthPage::Login,
        }
    }
}

#[derive(Template)]
#[template(path = "protected.html")]
pub struct ProtectedTemplate {
    pub title: String,
    pub email: String,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_pages_render_titles() {
        let html = AuthPageTemplate::new(AuthPage::SignUp).render().unwrap();
        assert!(html.contains("Sign up"));
        assert!(html.contains("href=\"/auth/login\""));
    }

    #[test]
    fn landing_links_depend_on_session() {
        let signed_out = LandingTemplate {
            title: "Welcome".to_string(),
            authenticated: false,
        }
        .render()
        .unwrap();
        assert!(signed_out.contains("/auth/login"));

        let signed_in = LandingTemplate {
            title: "Welcome".to_string(),
            authenticated: true,
        }
        .render()
        .unwrap();
        assert!(signed_in.contains("/dashboard"));
    }
}
