//! Delivery payload formatting
//!
//! The payload is provider-neutral: a text body for SMS, a spoken script
//! for voice. Providers decide how to render it (e.g. wrapping the voice
//! script in TwiML).

use crate::domain::entities::verification_record::DeliveryMethod;

/// Payload handed to a [`super::Notifier`](super::traits::Notifier)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryPayload {
    /// Plain text message body
    Text(String),
    /// Spoken script for a voice call
    Voice(String),
}

impl DeliveryPayload {
    /// Build the payload for a code on the given channel.
    ///
    /// The voice script reads each digit individually, separated by pauses,
    /// and repeats the whole sequence once more for intelligibility.
    pub fn for_code(method: DeliveryMethod, code: &str) -> Self {
        match method {
            DeliveryMethod::Sms => Self::Text(format!("Your verification code is: {code}")),
            DeliveryMethod::Voice => {
                let spoken = spell_digits(code);
                Self::Voice(format!(
                    "Your verification code is: {spoken}. \
                     I repeat, your verification code is: {spoken}."
                ))
            }
        }
    }

    /// Whether this payload rides a voice call rather than a text message
    pub fn is_voice(&self) -> bool {
        matches!(self, Self::Voice(_))
    }
}

/// Separate each digit with a comma so text-to-speech pauses between them
fn spell_digits(code: &str) -> String {
    code.chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_payload_contains_code() {
        let payload = DeliveryPayload::for_code(DeliveryMethod::Sms, "123456");
        assert_eq!(
            payload,
            DeliveryPayload::Text("Your verification code is: 123456".to_string())
        );
        assert!(!payload.is_voice());
    }

    #[test]
    fn test_voice_script_spells_digits_and_repeats() {
        let payload = DeliveryPayload::for_code(DeliveryMethod::Voice, "123456");
        let DeliveryPayload::Voice(script) = payload else {
            panic!("expected a voice payload");
        };

        // each digit read individually, separated by pauses
        assert_eq!(script.matches("1, 2, 3, 4, 5, 6").count(), 2);
        // the raw code never appears as one word
        assert!(!script.contains("123456"));
    }

    #[test]
    fn test_spell_digits() {
        assert_eq!(spell_digits("042"), "0, 4, 2");
        assert_eq!(spell_digits("7"), "7");
    }
}
