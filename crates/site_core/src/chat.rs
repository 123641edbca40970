//! Scripted chat widget: lowercase substring matching over a canned-response
//! table, with a catch-all reply.

const RESPONSES: &[(&str, &str)] = &[
    (
        "hello",
        "Hello! Welcome to Comfort & Pondlike. How can I help you today?",
    ),
    (
        "products",
        "We offer a wide range of health and wellness products. Would you like to know about any specific category?",
    ),
    (
        "price",
        "Our products range from $24.99 to $99.99. Check out our featured products section for current pricing.",
    ),
    (
        "shipping",
        "We offer free shipping on orders over $50. Standard delivery takes 3-5 business days.",
    ),
    (
        "return",
        "We have a 30-day return policy. All products can be returned in their original condition.",
    ),
];

const DEFAULT_RESPONSE: &str = "Thank you for your message. Our team will get back to you shortly. Is there anything specific I can help you with?";

#[derive(Debug, Clone, Copy, Default)]
pub struct ChatResponder;

impl ChatResponder {
    pub fn new() -> Self {
        Self
    }

    /// Reply to a visitor message, or `None` when the message is blank and
    /// no exchange should happen. The first matching keyword wins.
    pub fn reply(&self, message: &str) -> Option<&'static str> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }
        let lower = message.to_lowercase();
        let matched = RESPONSES
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
            .map(|(_, response)| *response);
        Some(matched.unwrap_or(DEFAULT_RESPONSE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_match_case_insensitively_anywhere() {
        let responder = ChatResponder::new();
        let reply = responder.reply("HELLO there!").expect("reply");
        assert!(reply.starts_with("Hello! Welcome"));

        let reply = responder.reply("what is your Return policy?").expect("reply");
        assert!(reply.contains("30-day return policy"));
    }

    #[test]
    fn first_listed_keyword_wins_on_ties() {
        let responder = ChatResponder::new();
        let reply = responder.reply("hello, what products do you have?").expect("reply");
        assert!(reply.starts_with("Hello!"));
    }

    #[test]
    fn unmatched_messages_get_the_default() {
        let responder = ChatResponder::new();
        let reply = responder.reply("do you sell gift cards?").expect("reply");
        assert_eq!(reply, DEFAULT_RESPONSE);
    }

    #[test]
    fn blank_messages_produce_no_exchange() {
        let responder = ChatResponder::new();
        assert!(responder.reply("").is_none());
        assert!(responder.reply("   \t ").is_none());
    }
}
