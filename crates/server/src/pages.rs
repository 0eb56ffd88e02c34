//! # Pages
//!
//! The navigation controller. A page is selected by name and rendered as a JSON
//! view: its title, the form it exposes, and the data it displays. Form
//! submissions go to the action endpoints in `handlers`.

use crate::{
    session::SessionContext,
    state::AppState,
    types::{DETAILS_REQUIRED, DETAILS_REQUIRED_TO_POST, INSUFFICIENT_DATA},
};
use avethics::{
    constants::RECENT_REGULATIONS_LIMIT,
    questionnaire::{Question, QUESTIONS},
    regulation::has_sufficient_data,
    thread::{flatten, render_markdown, ThreadLine},
    types::{Gender, KnowsAutonomous, Post, Regulation, MAX_AGE},
    EthicsError, SqliteProvider,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const WELCOME: &str = "This app collects user opinions on ethical considerations for autonomous vehicles. \
Your data is used to generate regulations that give guidelines to AI developers. \
Please proceed through the pages to provide your input. \
Answer all the questions carefully and then feel free to chat on our forum page and interact with other users.";

const NO_POSTS: &str = "No posts yet. Be the first to post!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Home,
    UserDetails,
    Questionnaire,
    Forum,
    RegulationGenerator,
    DownloadData,
}

impl Page {
    /// Pages in navigation order.
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::UserDetails,
        Page::Questionnaire,
        Page::Forum,
        Page::RegulationGenerator,
        Page::DownloadData,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::UserDetails => "user-details",
            Page::Questionnaire => "questionnaire",
            Page::Forum => "forum",
            Page::RegulationGenerator => "regulation-generator",
            Page::DownloadData => "download-data",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::UserDetails => "User Details",
            Page::Questionnaire => "Questionnaire",
            Page::Forum => "Forum",
            Page::RegulationGenerator => "Regulation Generator",
            Page::DownloadData => "Download Data",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Page {
    type Err = String;

    /// Accepts either the slug (`user-details`) or the title (`User Details`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.slug() == s || p.title().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown page '{s}'."))
    }
}

/// An entry of the navigation control.
#[derive(Debug, Serialize)]
pub struct PageLink {
    pub slug: &'static str,
    pub title: &'static str,
}

pub fn navigation() -> Vec<PageLink> {
    Page::ALL
        .iter()
        .map(|p| PageLink {
            slug: p.slug(),
            title: p.title(),
        })
        .collect()
}

// --- Page views ---

#[derive(Debug, Serialize)]
pub struct PageView {
    pub page: Page,
    pub title: &'static str,
    #[serde(flatten)]
    pub body: PageBody,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageBody {
    Home {
        welcome: &'static str,
    },
    UserDetails {
        form: Vec<FormField>,
        /// Set once this session has submitted its details.
        user_id: Option<i64>,
    },
    Questionnaire {
        questions: &'static [Question],
        can_submit: bool,
        warning: Option<&'static str>,
    },
    Forum {
        can_post: bool,
        warning: Option<&'static str>,
        posts: Vec<PostThread>,
        empty_message: Option<&'static str>,
    },
    RegulationGenerator {
        can_generate: bool,
        warning: Option<&'static str>,
        previous: Vec<Regulation>,
    },
    DownloadData {
        downloads: Vec<Download>,
    },
}

#[derive(Debug, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub input: FieldInput,
}

#[derive(Debug, Serialize)]
#[serde(tag = "input", rename_all = "snake_case")]
pub enum FieldInput {
    Text,
    Number { min: i64, max: i64, step: i64 },
    Select { options: Vec<&'static str> },
}

#[derive(Debug, Serialize)]
pub struct Download {
    pub label: &'static str,
    pub href: &'static str,
}

/// A post with its comment thread.
#[derive(Debug, Serialize)]
pub struct PostThread {
    #[serde(flatten)]
    pub post: Post,
    /// Comments depth-first, each with its nesting level.
    pub comments: Vec<ThreadLine>,
    /// The thread as indented markdown.
    pub rendered: String,
}

/// Loads every post, newest first, with its threaded comments.
pub async fn load_threads(provider: &SqliteProvider) -> Result<Vec<PostThread>, EthicsError> {
    let posts = provider.get_posts().await?;
    let mut threads = Vec::with_capacity(posts.len());
    for post in posts {
        let comments = provider.get_comments(post.id).await?;
        threads.push(PostThread {
            comments: flatten(&comments),
            rendered: render_markdown(&comments),
            post,
        });
    }
    Ok(threads)
}

fn user_details_form() -> Vec<FormField> {
    vec![
        FormField {
            name: "name",
            label: "Name",
            input: FieldInput::Text,
        },
        FormField {
            name: "age",
            label: "Age",
            input: FieldInput::Number {
                min: 0,
                max: MAX_AGE,
                step: 1,
            },
        },
        FormField {
            name: "gender",
            label: "Gender",
            input: FieldInput::Select {
                options: Gender::ALL.iter().map(Gender::as_str).collect(),
            },
        },
        FormField {
            name: "knows_autonomous",
            label: "Do you know about autonomous vehicles?",
            input: FieldInput::Select {
                options: KnowsAutonomous::ALL
                    .iter()
                    .map(KnowsAutonomous::as_str)
                    .collect(),
            },
        },
    ]
}

/// Renders `page` for the given session.
pub async fn render_page(
    state: &AppState,
    session: &SessionContext,
    page: Page,
) -> Result<PageView, EthicsError> {
    let signed_in = session.user_id.is_some();
    let body = match page {
        Page::Home => PageBody::Home { welcome: WELCOME },
        Page::UserDetails => PageBody::UserDetails {
            form: user_details_form(),
            user_id: session.user_id,
        },
        Page::Questionnaire => PageBody::Questionnaire {
            questions: &QUESTIONS,
            can_submit: signed_in,
            warning: (!signed_in).then_some(DETAILS_REQUIRED),
        },
        Page::Forum => {
            let posts = load_threads(&state.sqlite_provider).await?;
            PageBody::Forum {
                can_post: signed_in,
                warning: (!signed_in).then_some(DETAILS_REQUIRED_TO_POST),
                empty_message: posts.is_empty().then_some(NO_POSTS),
                posts,
            }
        }
        Page::RegulationGenerator => {
            let provider = &state.sqlite_provider;
            let users = provider.get_users().await?;
            let responses = provider.get_all_responses().await?;
            let can_generate = has_sufficient_data(&users, &responses);
            PageBody::RegulationGenerator {
                can_generate,
                warning: (!can_generate).then_some(INSUFFICIENT_DATA),
                previous: provider
                    .get_recent_regulations(RECENT_REGULATIONS_LIMIT)
                    .await?,
            }
        }
        Page::DownloadData => PageBody::DownloadData {
            downloads: vec![
                Download {
                    label: "Users (CSV)",
                    href: "/download/users.csv",
                },
                Download {
                    label: "Questionnaire responses (CSV)",
                    href: "/download/responses.csv",
                },
            ],
        },
    };

    Ok(PageView {
        page,
        title: page.title(),
        body,
    })
}
