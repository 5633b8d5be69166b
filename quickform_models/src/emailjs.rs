use nutype::nutype;

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct EmailJsServiceId(String);

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct EmailJsTemplateId(String);

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct EmailJsPublicKey(String);

/// The three settings needed to send a template email through EmailJS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsCredentials {
    pub service_id: EmailJsServiceId,
    pub template_id: EmailJsTemplateId,
    pub public_key: EmailJsPublicKey,
}

impl EmailJsCredentials {
    /// Returns `None` unless all three values are present and non-blank.
    /// Partial configuration counts as absent.
    pub fn from_parts(
        service_id: Option<String>,
        template_id: Option<String>,
        public_key: Option<String>,
    ) -> Option<Self> {
        Some(Self {
            service_id: service_id.and_then(|x| x.try_into().ok())?,
            template_id: template_id.and_then(|x| x.try_into().ok())?,
            public_key: public_key.and_then(|x| x.try_into().ok())?,
        })
    }
}
