use rust_decimal::Decimal;

use crate::core::config::StorefrontConfig;
use crate::features::contact::dtos::ContactChannelsDto;

/// Default greeting for a general enquiry
pub const GENERAL_MESSAGE: &str = "Hola! Me gustaría obtener más información sobre sus productos.";

/// Subject line of the prefilled contact email
pub const EMAIL_SUBJECT: &str = "Consulta sobre productos";

/// A chat deep link of the form `{base_url}/{recipient}?text={message}`.
///
/// Building the link is all this service does; the customer's browser opens
/// it and nothing is ever sent from here.
#[derive(Debug, Clone)]
pub struct MessagingLink {
    base_url: String,
    recipient: String,
}

impl MessagingLink {
    pub fn new(base_url: &str, recipient: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            recipient: recipient.to_string(),
        }
    }

    pub fn with_text(&self, text: &str) -> String {
        format!(
            "{}/{}?text={}",
            self.base_url,
            self.recipient,
            urlencoding::encode(text)
        )
    }
}

/// Builds the prefilled links that hand a customer over to the shop.
pub struct ContactService {
    whatsapp: MessagingLink,
    phone: String,
    email: String,
    public_url: String,
}

impl ContactService {
    pub fn new(config: &StorefrontConfig) -> Self {
        Self {
            whatsapp: MessagingLink::new(&config.whatsapp_base_url, &config.whatsapp_phone),
            phone: config.whatsapp_phone.clone(),
            email: config.contact_email.clone(),
            public_url: config.public_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn whatsapp_link(&self, message: &str) -> String {
        self.whatsapp.with_text(message)
    }

    pub fn general_link(&self) -> String {
        self.whatsapp_link(GENERAL_MESSAGE)
    }

    /// Public storefront URL of a product page
    pub fn product_url(&self, slug: &str) -> String {
        format!("{}/productos/{}", self.public_url, slug)
    }

    pub fn product_order_message(&self, name: &str, price: Decimal, slug: &str) -> String {
        format!(
            "Hola! Quiero el producto: {} - ${} ({})",
            name,
            price.normalize(),
            self.product_url(slug)
        )
    }

    pub fn product_order_link(&self, name: &str, price: Decimal, slug: &str) -> String {
        self.whatsapp_link(&self.product_order_message(name, price, slug))
    }

    pub fn email_link(&self, subject: &str, body: &str) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.email,
            urlencoding::encode(subject),
            urlencoding::encode(body)
        )
    }

    pub fn phone_link(&self) -> String {
        format!("tel:+{}", self.phone)
    }

    /// Every contact channel, prefilled with `message` or the general greeting.
    pub fn channels(&self, message: Option<&str>) -> ContactChannelsDto {
        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERAL_MESSAGE);

        ContactChannelsDto {
            whatsapp_url: self.whatsapp_link(message),
            email: self.email.clone(),
            email_url: self.email_link(EMAIL_SUBJECT, message),
            phone: self.phone.clone(),
            phone_url: self.phone_link(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ContactService {
        ContactService::new(&StorefrontConfig {
            whatsapp_phone: "5215512345678".to_string(),
            whatsapp_base_url: "https://wa.me/".to_string(),
            contact_email: "hola@tienda.mx".to_string(),
            public_url: "https://tienda.mx/".to_string(),
        })
    }

    #[test]
    fn test_messaging_link_encodes_text() {
        let link = MessagingLink::new("https://wa.me", "123").with_text("Hola & adiós?");
        assert_eq!(link, "https://wa.me/123?text=Hola%20%26%20adi%C3%B3s%3F");
    }

    #[test]
    fn test_general_link() {
        let link = service().general_link();
        assert!(link.starts_with("https://wa.me/5215512345678?text=Hola%21%20Me%20gustar"));
        assert_eq!(
            urlencoding::decode(link.split("text=").nth(1).unwrap()).unwrap(),
            GENERAL_MESSAGE
        );
    }

    #[test]
    fn test_product_order_message() {
        let message =
            service().product_order_message("Labial Rojo", Decimal::new(120000, 2), "labial-rojo");
        assert_eq!(
            message,
            "Hola! Quiero el producto: Labial Rojo - $1200 (https://tienda.mx/productos/labial-rojo)"
        );

        let message =
            service().product_order_message("Rubor", Decimal::new(45050, 2), "rubor");
        assert!(message.contains("- $450.5 ("));
    }

    #[test]
    fn test_product_order_link_round_trips_message() {
        let svc = service();
        let link = svc.product_order_link("Sombra Azul", Decimal::from(3500), "sombra-azul");
        let text = link.split("text=").nth(1).unwrap();
        assert_eq!(
            urlencoding::decode(text).unwrap(),
            svc.product_order_message("Sombra Azul", Decimal::from(3500), "sombra-azul")
        );
    }

    #[test]
    fn test_email_link() {
        assert_eq!(
            service().email_link(EMAIL_SUBJECT, "Hola"),
            "mailto:hola@tienda.mx?subject=Consulta%20sobre%20productos&body=Hola"
        );
    }

    #[test]
    fn test_channels_fall_back_to_general_message() {
        let channels = service().channels(Some("   "));
        assert_eq!(channels.message, GENERAL_MESSAGE);
        assert_eq!(channels.phone_url, "tel:+5215512345678");

        let channels = service().channels(Some("¿Tienen envíos?"));
        assert_eq!(channels.message, "¿Tienen envíos?");
        assert!(channels.email_url.ends_with(&urlencoding::encode("¿Tienen envíos?").into_owned()));
    }
}
