// SPDX-FileCopyrightText: 2026 Partnerdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in knowledge-base corpus.
//!
//! Shipped with the assistant so search works out of the box. The engine
//! takes any corpus at construction; this is just the default one.

use chrono::NaiveDate;

use crate::article::{ArticleCategory, Difficulty, KnowledgeArticle};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Returns the built-in article corpus.
pub fn seed_articles() -> Vec<KnowledgeArticle> {
    vec![
        KnowledgeArticle {
            id: "kb-001".to_string(),
            title: "Getting Started with Daily Event Insurance Integration".to_string(),
            slug: "getting-started".to_string(),
            summary: "A complete guide to integrating Daily Event Insurance into your platform."
                .to_string(),
            content: r##"
# Getting Started with Daily Event Insurance Integration

Welcome! This guide will walk you through the complete process of integrating Daily Event Insurance into your platform.

## Prerequisites
- A partner account (sign up at partners.dailyeventinsurance.com)
- API credentials (available in your partner dashboard)
- Basic knowledge of JavaScript/TypeScript

## Step 1: Generate API Keys
Navigate to your partner dashboard and generate your API keys. You'll receive:
- **API Key**: For authenticating requests
- **Widget Key**: For embedding the insurance widget

## Step 2: Install the Widget
Add the following script to your website:
```html
<script src="https://cdn.dailyeventinsurance.com/widget.js"></script>
<div id="dei-widget" data-partner-key="YOUR_WIDGET_KEY"></div>
```

## Step 3: Configure Webhooks
Set up webhooks to receive real-time updates about policies and claims.

## Next Steps
- [Customize widget appearance](/docs/widget-customization)
- [Set up webhooks](/docs/webhooks)
- [Review API documentation](/docs/api-reference)
"##
            .to_string(),
            category: ArticleCategory::GettingStarted,
            tags: strings(&["setup", "integration", "quick-start", "api", "widget"]),
            related_topics: strings(&["widget-installation", "api-authentication", "webhooks"]),
            difficulty: Difficulty::Beginner,
            estimated_read_time: 5,
            last_updated: date(2024, 1, 15),
            helpful_count: 234,
            view_count: 1890,
        },
        KnowledgeArticle {
            id: "kb-002".to_string(),
            title: "Widget Installation Guide".to_string(),
            slug: "widget-installation".to_string(),
            summary:
                "Step-by-step instructions for installing the insurance widget on your website."
                    .to_string(),
            content: r##"
# Widget Installation Guide

The Daily Event Insurance widget makes it easy to offer event insurance directly on your website.

## Installation Methods

### Method 1: Script Tag (Recommended)
```html
<script src="https://cdn.dailyeventinsurance.com/widget.js"></script>
<div id="dei-widget" data-partner-key="YOUR_KEY"></div>
```

### Method 2: NPM Package
```bash
npm install @dailyeventinsurance/widget
```

```javascript
import { DeiWidget } from '@dailyeventinsurance/widget';

DeiWidget.init({
  partnerKey: 'YOUR_KEY',
  containerId: 'insurance-widget'
});
```

### Method 3: React Component
```jsx
import { InsuranceWidget } from '@dailyeventinsurance/react';

function App() {
  return <InsuranceWidget partnerKey="YOUR_KEY" />;
}
```

## Customization Options
- `theme`: 'light' | 'dark' | 'auto'
- `primaryColor`: Hex color code
- `language`: 'en' | 'es' | 'fr'
- `position`: 'inline' | 'modal' | 'sidebar'
"##
            .to_string(),
            category: ArticleCategory::WidgetIntegration,
            tags: strings(&["widget", "installation", "react", "npm", "customization"]),
            related_topics: strings(&[
                "getting-started",
                "widget-customization",
                "react-integration",
            ]),
            difficulty: Difficulty::Beginner,
            estimated_read_time: 4,
            last_updated: date(2024, 1, 20),
            helpful_count: 189,
            view_count: 1456,
        },
        KnowledgeArticle {
            id: "kb-003".to_string(),
            title: "API Authentication".to_string(),
            slug: "api-authentication".to_string(),
            summary: "Learn how to authenticate API requests with your partner credentials."
                .to_string(),
            content: r##"
# API Authentication

All API requests require authentication using your partner API key.

## Authentication Header
Include your API key in the Authorization header:
```
Authorization: Bearer YOUR_API_KEY
```

## Example Request
```javascript
const response = await fetch('https://api.dailyeventinsurance.com/v1/quotes', {
  method: 'POST',
  headers: {
    'Authorization': 'Bearer YOUR_API_KEY',
    'Content-Type': 'application/json'
  },
  body: JSON.stringify({
    eventType: 'birthday_party',
    eventDate: '2024-06-15',
    attendees: 50
  })
});
```

## API Key Security
- Never expose API keys in client-side code
- Use environment variables
- Rotate keys periodically
- Use separate keys for development and production
"##
            .to_string(),
            category: ArticleCategory::ApiReference,
            tags: strings(&["api", "authentication", "security", "authorization"]),
            related_topics: strings(&[
                "getting-started",
                "api-endpoints",
                "security-best-practices",
            ]),
            difficulty: Difficulty::Intermediate,
            estimated_read_time: 3,
            last_updated: date(2024, 1, 18),
            helpful_count: 156,
            view_count: 1234,
        },
        KnowledgeArticle {
            id: "kb-004".to_string(),
            title: "Connecting Mindbody POS".to_string(),
            slug: "mindbody-integration".to_string(),
            summary: "Complete guide to integrating with Mindbody point-of-sale system."
                .to_string(),
            content: r##"
# Connecting Mindbody POS

Integrate Daily Event Insurance with your Mindbody account for seamless booking and insurance sales.

## Prerequisites
- Active Mindbody subscription
- API access enabled in Mindbody
- Partner API credentials from Daily Event Insurance

## Step 1: Enable API Access
In Mindbody:
1. Go to Setup > API Access
2. Enable third-party API access
3. Note your Site ID and API Key

## Step 2: Connect in Partner Dashboard
1. Navigate to Integrations > POS Systems
2. Select Mindbody
3. Enter your Site ID and API Key
4. Test the connection

## Step 3: Configure Event Types
Map your Mindbody class types to insurance event types for automatic suggestions.

## Troubleshooting
- **Connection failed**: Verify API credentials
- **No events showing**: Check class type mapping
- **Sync errors**: Ensure webhooks are configured
"##
            .to_string(),
            category: ArticleCategory::PosIntegration,
            tags: strings(&["mindbody", "pos", "integration", "booking", "sync"]),
            related_topics: strings(&["pos-overview", "pike13-integration", "webhook-setup"]),
            difficulty: Difficulty::Intermediate,
            estimated_read_time: 6,
            last_updated: date(2024, 1, 22),
            helpful_count: 98,
            view_count: 876,
        },
        KnowledgeArticle {
            id: "kb-005".to_string(),
            title: "Troubleshooting Widget Issues".to_string(),
            slug: "widget-troubleshooting".to_string(),
            summary: "Common widget issues and their solutions.".to_string(),
            content: r##"
# Troubleshooting Widget Issues

## Widget Not Appearing

**Check Script Loading**
```javascript
// Verify script is loaded
if (window.DeiWidget) {
  console.log('Widget loaded successfully');
} else {
  console.log('Widget not loaded - check script tag');
}
```

**Common Causes**
1. Script blocked by ad blocker
2. Content Security Policy restrictions
3. Invalid partner key
4. Container element missing

## Widget Styling Issues

**CSS Conflicts**
Add isolation to prevent CSS conflicts:
```css
#dei-widget {
  all: initial;
}
```

## Quote Not Loading

**Check Network Requests**
1. Open browser DevTools
2. Go to Network tab
3. Look for failed requests to dailyeventinsurance.com

**API Rate Limits**
If you see 429 errors, you've hit rate limits. Contact support for increased limits.

## Mobile Display Issues
Ensure viewport meta tag is set:
```html
<meta name="viewport" content="width=device-width, initial-scale=1">
```
"##
            .to_string(),
            category: ArticleCategory::Troubleshooting,
            tags: strings(&["troubleshooting", "widget", "debugging", "errors", "css"]),
            related_topics: strings(&[
                "widget-installation",
                "widget-customization",
                "support-contact",
            ]),
            difficulty: Difficulty::Intermediate,
            estimated_read_time: 5,
            last_updated: date(2024, 1, 25),
            helpful_count: 145,
            view_count: 1123,
        },
        KnowledgeArticle {
            id: "kb-006".to_string(),
            title: "Webhook Configuration".to_string(),
            slug: "webhook-setup".to_string(),
            summary: "Set up webhooks to receive real-time updates about policies and events."
                .to_string(),
            content: r##"
# Webhook Configuration

Webhooks allow you to receive real-time notifications about policy events.

## Available Events
- `policy.created`: New policy purchased
- `policy.updated`: Policy modified
- `policy.cancelled`: Policy cancelled
- `claim.submitted`: New claim filed
- `claim.resolved`: Claim processed

## Setting Up Webhooks

1. Go to Partner Dashboard > Webhooks
2. Add your endpoint URL
3. Select events to subscribe to
4. Save and test

## Webhook Payload
```json
{
  "event": "policy.created",
  "timestamp": "2024-01-15T10:30:00Z",
  "data": {
    "policyId": "pol_abc123",
    "partnerId": "prt_xyz789",
    "eventDate": "2024-06-15",
    "coverage": {
      "type": "comprehensive",
      "amount": 50000
    }
  },
  "signature": "sha256=..."
}
```

## Verifying Signatures
Always verify webhook signatures to ensure authenticity.
"##
            .to_string(),
            category: ArticleCategory::ApiReference,
            tags: strings(&["webhooks", "api", "events", "notifications", "security"]),
            related_topics: strings(&[
                "api-authentication",
                "security-best-practices",
                "event-handling",
            ]),
            difficulty: Difficulty::Advanced,
            estimated_read_time: 7,
            last_updated: date(2024, 1, 24),
            helpful_count: 112,
            view_count: 945,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_six_articles_with_unique_ids() {
        let articles = seed_articles();
        assert_eq!(articles.len(), 6);
        let mut ids: Vec<&str> = articles.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn every_category_is_covered() {
        let articles = seed_articles();
        for category in [
            ArticleCategory::GettingStarted,
            ArticleCategory::WidgetIntegration,
            ArticleCategory::ApiReference,
            ArticleCategory::PosIntegration,
            ArticleCategory::Troubleshooting,
        ] {
            assert!(
                articles.iter().any(|a| a.category == category),
                "no article in category {category}"
            );
        }
    }
}
