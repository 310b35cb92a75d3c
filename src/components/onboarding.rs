//! Topic picker shown before the feed.

use maud::{html, Markup, Render};

use crate::feed::{FeedController, Topic};

/// A selectable topic row.
#[derive(Debug, Clone, Copy)]
pub struct TopicButton<'a> {
    pub topic: &'a Topic,
    pub selected: bool,
}

impl Render for TopicButton<'_> {
    fn render(&self) -> Markup {
        let class = if self.selected {
            "topic-button selected"
        } else {
            "topic-button"
        };
        html! {
            button class=(class) data-topic=(self.topic.id) {
                span class="topic-name" {
                    span class="topic-icon" { (self.topic.icon) }
                    (self.topic.label)
                }
                @if self.selected {
                    span class="topic-check" { "✓" }
                }
            }
        }
    }
}

/// The onboarding screen.
#[derive(Debug)]
pub struct OnboardingView<'a> {
    pub controller: &'a FeedController,
}

impl<'a> OnboardingView<'a> {
    #[must_use]
    pub const fn new(controller: &'a FeedController) -> Self {
        Self { controller }
    }
}

impl Render for OnboardingView<'_> {
    fn render(&self) -> Markup {
        let c = self.controller;
        html! {
            section class="onboarding" {
                header {
                    h1 { "Sidebar." }
                    p class="tagline" {
                        "Curating through the noise."
                        br;
                        "Relaxed insights from AI agents tailored to your interests."
                    }
                }
                h2 class="section-title" { "Select Your Topics" }
                div class="topic-list" {
                    @for topic in c.topics() {
                        (TopicButton { topic, selected: c.is_topic_selected(&topic.id) })
                    }
                }
                button class="enter-stream" { "ENTER STREAM" }
            }
        }
    }
}
