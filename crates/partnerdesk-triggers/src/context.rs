// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-route greeting and nudge copy.

/// Greeting, quick prompts, and nudge text for one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    pub greeting: &'static str,
    pub help_prompts: &'static [&'static str],
    pub idle_message: &'static str,
    pub exit_message: &'static str,
}

/// Fallback for routes without specific copy.
pub const DEFAULT_CONTEXT: PageContext = PageContext {
    greeting: "Hi! Need help with anything?",
    help_prompts: &[
        "How does this work?",
        "What coverage options exist?",
        "How do I get started?",
    ],
    idle_message: "Looking for something? I'm here to help!",
    exit_message: "Have questions? I'm just a click away.",
};

/// Looks up the copy for a route, falling back to [`DEFAULT_CONTEXT`].
pub fn page_context(route: &str) -> &'static PageContext {
    match route {
        "/onboarding" => &PageContext {
            greeting: "Need help getting started with your integration?",
            help_prompts: &[
                "How do I install the widget?",
                "What API credentials do I need?",
                "How long does setup take?",
            ],
            idle_message: "Taking your time? I can walk you through the setup step-by-step.",
            exit_message: "Before you go - want me to save your progress or send setup instructions to your email?",
        },
        "/onboarding/widget" => &PageContext {
            greeting: "Ready to add the insurance widget to your site?",
            help_prompts: &[
                "Show me the embed code",
                "How do I customize colors?",
                "Can I preview it first?",
            ],
            idle_message: "Need help with the widget code? I can generate it for your specific setup.",
            exit_message: "Widget not working as expected? Let me help troubleshoot before you leave.",
        },
        "/onboarding/api" => &PageContext {
            greeting: "Setting up API integration? I can help with authentication.",
            help_prompts: &[
                "How do I get API keys?",
                "Show me the endpoints",
                "What about webhooks?",
            ],
            idle_message: "API setup can be tricky. Want me to explain the authentication flow?",
            exit_message: "Still have questions about the API? I can send you documentation.",
        },
        "/onboarding/pos" => &PageContext {
            greeting: "Connecting your POS system? Let me guide you.",
            help_prompts: &[
                "Which POS systems work?",
                "How to connect Mindbody?",
                "What data syncs?",
            ],
            idle_message: "POS integrations have specific requirements. Shall I check your system compatibility?",
            exit_message: "POS connection not complete? I can help you finish the setup.",
        },
        "/partner" => &PageContext {
            greeting: "Welcome to your partner dashboard!",
            help_prompts: &[
                "How do I view my earnings?",
                "Where are my policies?",
                "How to get support?",
            ],
            idle_message: "Looking for something specific? I can help you navigate the dashboard.",
            exit_message: "Have questions about your partnership? Let me know before you go.",
        },
        "/quote" => &PageContext {
            greeting: "Getting a quote? I can explain coverage options.",
            help_prompts: &[
                "What's covered?",
                "How is pricing calculated?",
                "Can I customize coverage?",
            ],
            idle_message: "Not sure about coverage options? I can break down what each plan includes.",
            exit_message: "Need help deciding? I can compare options for your specific event.",
        },
        _ => &DEFAULT_CONTEXT,
    }
}
