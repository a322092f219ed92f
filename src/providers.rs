//! Static catalog of email-sending providers, keyed by the base
//! domain found in SPF `include:` targets. Data, not logic: the SPF
//! parser groups matches by category to summarise who is allowed to
//! send mail on a candidate's behalf.

pub const EMAIL_WORKSPACES: &str = "Email Workspaces";
pub const TRANSACTIONAL: &str = "Transactional Email";
pub const MARKETING: &str = "Marketing";
pub const SUPPORT_CRM: &str = "Support & CRM";
pub const SECURITY: &str = "Security & Filtering";
pub const ECOMMERCE: &str = "E-commerce & Payments";
pub const HOSTING: &str = "Hosting & Cloud";
pub const COLLABORATION: &str = "Productivity & Collaboration";

#[derive(Clone, Copy, Debug)]
pub struct Provider {
    pub domain: &'static str,
    pub name: &'static str,
    pub category: &'static str,
}

/// Look up a provider by the base domain of an `include:` target.
pub fn find(base_domain: &str) -> Option<&'static Provider> {
    PROVIDERS.iter().find(|p| p.domain == base_domain)
}

macro_rules! provider {
    ($domain:literal, $name:literal, $category:expr) => {
        Provider {
            domain: $domain,
            name: $name,
            category: $category,
        }
    };
}

pub static PROVIDERS: &[Provider] = &[
    // Hosted mailbox suites
    provider!("google.com", "Google Workspace", EMAIL_WORKSPACES),
    provider!("googlemail.com", "Google Workspace", EMAIL_WORKSPACES),
    provider!("outlook.com", "Microsoft 365", EMAIL_WORKSPACES),
    provider!("office365.com", "Microsoft 365", EMAIL_WORKSPACES),
    provider!("zoho.com", "Zoho Mail", EMAIL_WORKSPACES),
    provider!("zoho.eu", "Zoho Mail", EMAIL_WORKSPACES),
    provider!("fastmail.com", "Fastmail", EMAIL_WORKSPACES),
    provider!("messagingengine.com", "Fastmail", EMAIL_WORKSPACES),
    provider!("protonmail.ch", "Proton Mail", EMAIL_WORKSPACES),
    provider!("icloud.com", "Apple iCloud Mail", EMAIL_WORKSPACES),
    provider!("yandex.net", "Yandex 360", EMAIL_WORKSPACES),
    provider!("mail.ru", "Mail.ru", EMAIL_WORKSPACES),
    provider!("gmx.net", "GMX", EMAIL_WORKSPACES),
    provider!("aol.com", "AOL Mail", EMAIL_WORKSPACES),
    provider!("qq.com", "Tencent Exmail", EMAIL_WORKSPACES),
    provider!("163.com", "NetEase Mail", EMAIL_WORKSPACES),
    provider!("infomaniak.ch", "Infomaniak", EMAIL_WORKSPACES),
    provider!("migadu.com", "Migadu", EMAIL_WORKSPACES),
    provider!("mxroute.com", "MXroute", EMAIL_WORKSPACES),
    provider!("privateemail.com", "Namecheap Private Email", EMAIL_WORKSPACES),
    // Transactional sending APIs
    provider!("sendgrid.net", "Twilio SendGrid", TRANSACTIONAL),
    provider!("mailgun.org", "Mailgun", TRANSACTIONAL),
    provider!("mailgun.com", "Mailgun", TRANSACTIONAL),
    provider!("amazonses.com", "Amazon SES", TRANSACTIONAL),
    provider!("sparkpostmail.com", "SparkPost", TRANSACTIONAL),
    provider!("sparkpost.com", "SparkPost", TRANSACTIONAL),
    provider!("mtasv.net", "Postmark", TRANSACTIONAL),
    provider!("postmarkapp.com", "Postmark", TRANSACTIONAL),
    provider!("mandrillapp.com", "Mandrill", TRANSACTIONAL),
    provider!("sendinblue.com", "Brevo", TRANSACTIONAL),
    provider!("brevo.com", "Brevo", TRANSACTIONAL),
    provider!("mailjet.com", "Mailjet", TRANSACTIONAL),
    provider!("smtp.com", "SMTP.com", TRANSACTIONAL),
    provider!("socketlabs.com", "SocketLabs", TRANSACTIONAL),
    provider!("mailersend.net", "MailerSend", TRANSACTIONAL),
    provider!("resend.com", "Resend", TRANSACTIONAL),
    provider!("elasticemail.com", "Elastic Email", TRANSACTIONAL),
    provider!("smtp2go.com", "SMTP2GO", TRANSACTIONAL),
    provider!("pepipost.com", "Netcore", TRANSACTIONAL),
    provider!("sendpulse.com", "SendPulse", TRANSACTIONAL),
    provider!("mailtrap.io", "Mailtrap", TRANSACTIONAL),
    // Marketing platforms
    provider!("mailchimp.com", "Mailchimp", MARKETING),
    provider!("mcsv.net", "Mailchimp", MARKETING),
    provider!("rsgsv.net", "Mailchimp", MARKETING),
    provider!("constantcontact.com", "Constant Contact", MARKETING),
    provider!("exacttarget.com", "Salesforce Marketing Cloud", MARKETING),
    provider!("hubspotemail.net", "HubSpot", MARKETING),
    provider!("klaviyo.com", "Klaviyo", MARKETING),
    provider!("klaviyomail.com", "Klaviyo", MARKETING),
    provider!("createsend.com", "Campaign Monitor", MARKETING),
    provider!("cmail19.com", "Campaign Monitor", MARKETING),
    provider!("aweber.com", "AWeber", MARKETING),
    provider!("getresponse.com", "GetResponse", MARKETING),
    provider!("icontact.com", "iContact", MARKETING),
    provider!("sailthru.com", "Sailthru", MARKETING),
    provider!("braze.com", "Braze", MARKETING),
    provider!("iterable.com", "Iterable", MARKETING),
    provider!("customeriomail.com", "Customer.io", MARKETING),
    provider!("drip.com", "Drip", MARKETING),
    provider!("omnisend.com", "Omnisend", MARKETING),
    provider!("dotdigital.com", "Dotdigital", MARKETING),
    provider!("mailerlite.com", "MailerLite", MARKETING),
    provider!("moosend.com", "Moosend", MARKETING),
    provider!("activecampaign.com", "ActiveCampaign", MARKETING),
    provider!("emsend.com", "ActiveCampaign", MARKETING),
    // Support desks and CRM
    provider!("zendesk.com", "Zendesk", SUPPORT_CRM),
    provider!("freshdesk.com", "Freshdesk", SUPPORT_CRM),
    provider!("freshemail.com", "Freshworks", SUPPORT_CRM),
    provider!("salesforce.com", "Salesforce", SUPPORT_CRM),
    provider!("helpscout.net", "Help Scout", SUPPORT_CRM),
    provider!("intercom-mail.com", "Intercom", SUPPORT_CRM),
    provider!("intercom.io", "Intercom", SUPPORT_CRM),
    provider!("frontapp.com", "Front", SUPPORT_CRM),
    provider!("kustomer.com", "Kustomer", SUPPORT_CRM),
    provider!("pipedrive.com", "Pipedrive", SUPPORT_CRM),
    provider!("zohodesk.com", "Zoho Desk", SUPPORT_CRM),
    provider!("servicenow.com", "ServiceNow", SUPPORT_CRM),
    provider!("gorgias.com", "Gorgias", SUPPORT_CRM),
    // Inbound filtering and security gateways
    provider!("pphosted.com", "Proofpoint", SECURITY),
    provider!("proofpoint.com", "Proofpoint", SECURITY),
    provider!("mimecast.com", "Mimecast", SECURITY),
    provider!("mimecast.org", "Mimecast", SECURITY),
    provider!("barracudanetworks.com", "Barracuda", SECURITY),
    provider!("messagelabs.com", "Broadcom Email Security", SECURITY),
    provider!("trendmicro.com", "Trend Micro", SECURITY),
    provider!("trendmicro.eu", "Trend Micro", SECURITY),
    provider!("sophos.com", "Sophos", SECURITY),
    provider!("iphmx.com", "Cisco Secure Email", SECURITY),
    provider!("mailcontrol.com", "Forcepoint", SECURITY),
    provider!("spamexperts.com", "SpamExperts", SECURITY),
    provider!("mailroute.net", "MailRoute", SECURITY),
    provider!("duocircle.com", "DuoCircle", SECURITY),
    provider!("hornetsecurity.com", "Hornetsecurity", SECURITY),
    provider!("retarus.com", "Retarus", SECURITY),
    provider!("perception-point.io", "Perception Point", SECURITY),
    provider!("fireeyecloud.com", "Trellix Email Security", SECURITY),
    // Commerce and payments
    provider!("shopify.com", "Shopify", ECOMMERCE),
    provider!("shopifyemail.com", "Shopify", ECOMMERCE),
    provider!("bigcommerce.com", "BigCommerce", ECOMMERCE),
    provider!("squarespace.com", "Squarespace", ECOMMERCE),
    provider!("squarespace-mail.com", "Squarespace", ECOMMERCE),
    provider!("wix.com", "Wix", ECOMMERCE),
    provider!("paypal.com", "PayPal", ECOMMERCE),
    provider!("stripe.com", "Stripe", ECOMMERCE),
    provider!("squareup.com", "Square", ECOMMERCE),
    provider!("klarna.com", "Klarna", ECOMMERCE),
    provider!("ebay.com", "eBay", ECOMMERCE),
    provider!("amazon.com", "Amazon", ECOMMERCE),
    // Hosting, registrars and clouds
    provider!("secureserver.net", "GoDaddy", HOSTING),
    provider!("godaddy.com", "GoDaddy", HOSTING),
    provider!("registrar-servers.com", "Namecheap", HOSTING),
    provider!("ovh.com", "OVHcloud", HOSTING),
    provider!("your-server.de", "Hetzner", HOSTING),
    provider!("bluehost.com", "Bluehost", HOSTING),
    provider!("hostgator.com", "HostGator", HOSTING),
    provider!("websitewelcome.com", "HostGator", HOSTING),
    provider!("dreamhost.com", "DreamHost", HOSTING),
    provider!("mailspamprotection.com", "SiteGround", HOSTING),
    provider!("kundenserver.de", "IONOS", HOSTING),
    provider!("perfora.net", "IONOS", HOSTING),
    provider!("cloudflare.com", "Cloudflare", HOSTING),
    provider!("digitalocean.com", "DigitalOcean", HOSTING),
    provider!("linode.com", "Akamai Linode", HOSTING),
    provider!("wpengine.com", "WP Engine", HOSTING),
    provider!("wixdns.net", "Wix", HOSTING),
    // Collaboration suites that send on the org's behalf
    provider!("slack.com", "Slack", COLLABORATION),
    provider!("notion.so", "Notion", COLLABORATION),
    provider!("asana.com", "Asana", COLLABORATION),
    provider!("monday.com", "monday.com", COLLABORATION),
    provider!("airtable.com", "Airtable", COLLABORATION),
    provider!("dropbox.com", "Dropbox", COLLABORATION),
    provider!("box.com", "Box", COLLABORATION),
    provider!("docusign.net", "Docusign", COLLABORATION),
    provider!("adobe.com", "Adobe", COLLABORATION),
    provider!("atlassian.net", "Atlassian", COLLABORATION),
    provider!("atlassian.com", "Atlassian", COLLABORATION),
];
