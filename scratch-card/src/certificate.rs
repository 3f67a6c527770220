use crate::constants::*;
use crate::game::GameState;
use crate::types::WonGift;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

// End-of-game certificate and the export collaborators around it. Rendering, sharing and
// downloading are platform services; failures are logged and never touch game state.

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Certificate {
    pub gifts: Vec<WonGift>,
}

impl Certificate {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            gifts: state.won_gifts(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ShareRequest {
    pub filename: String,
    pub title: String,
    pub text: String,
}

impl Default for ShareRequest {
    fn default() -> Self {
        Self {
            filename: CERTIFICATE_FILENAME.to_string(),
            title: SHARE_TITLE.to_string(),
            text: SHARE_TEXT.to_string(),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait CertificateRenderer {
    type Image;

    async fn render(&self, certificate: &Certificate) -> Result<Self::Image>;
}

#[allow(async_fn_in_trait)]
pub trait ShareTarget<I> {
    /// Feature detection. When false the share affordance is hidden.
    fn can_share(&self) -> bool;

    async fn share(&self, image: I, request: &ShareRequest) -> Result<()>;
}

pub trait Downloader<I> {
    fn download(&self, image: I, filename: &str) -> Result<()>;
}

pub trait Celebration {
    fn celebrate(&self);
}

pub async fn download_certificate<R, D>(renderer: &R, downloader: &D, certificate: &Certificate) -> bool
where
    R: CertificateRenderer,
    D: Downloader<R::Image>,
{
    let outcome = match renderer.render(certificate).await {
        Ok(image) => downloader.download(image, CERTIFICATE_FILENAME),
        Err(e) => Err(e),
    };
    match outcome {
        Ok(()) => {
            info!(gifts = certificate.gifts.len(), "certificate downloaded");
            true
        }
        Err(e) => {
            error!("error downloading certificate: {e:#}");
            false
        }
    }
}

pub async fn share_certificate<R, S>(renderer: &R, target: &S, certificate: &Certificate) -> bool
where
    R: CertificateRenderer,
    S: ShareTarget<R::Image>,
{
    if !target.can_share() {
        warn!("native share unavailable");
        return false;
    }
    let request = ShareRequest::default();
    let outcome = match renderer.render(certificate).await {
        Ok(image) => target.share(image, &request).await,
        Err(e) => Err(e),
    };
    match outcome {
        Ok(()) => true,
        Err(e) => {
            error!("error sharing: {e:#}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct TextRenderer {
        fail: bool,
    }

    impl CertificateRenderer for TextRenderer {
        type Image = String;

        async fn render(&self, certificate: &Certificate) -> Result<String> {
            if self.fail {
                return Err(anyhow!("node could not be rasterised"));
            }
            let names: Vec<_> = certificate.gifts.iter().map(|g| g.name.as_str()).collect();
            Ok(names.join(","))
        }
    }

    #[derive(Default)]
    struct Recorder {
        available: bool,
        received: RefCell<Vec<(String, String)>>,
    }

    impl Downloader<String> for Recorder {
        fn download(&self, image: String, filename: &str) -> Result<()> {
            self.received.borrow_mut().push((image, filename.to_string()));
            Ok(())
        }
    }

    impl ShareTarget<String> for Recorder {
        fn can_share(&self) -> bool {
            self.available
        }

        async fn share(&self, image: String, request: &ShareRequest) -> Result<()> {
            self.received.borrow_mut().push((image, request.title.clone()));
            Ok(())
        }
    }

    fn certificate() -> Certificate {
        Certificate {
            gifts: vec![
                WonGift {
                    name: "Hoodie".into(),
                    image: "images/hoodie.jpg".into(),
                },
                WonGift {
                    name: "Bean Bag Chair".into(),
                    image: "images/bean-bag.jpg".into(),
                },
            ],
        }
    }

    #[test]
    fn restored_certificate_lists_only_scratched_gifts() {
        let mut slots = crate::rng::allocate(&crate::catalog::build_catalog(), &mut crate::rng::pcg_from_seed(6));
        slots[1].scratched = true;
        slots[4].scratched = true;
        let names = [slots[1].prize.name.clone(), slots[4].prize.name.clone()];
        let state = GameState::restore(slots, SELECTIONS_ALLOWED);
        let certificate = Certificate::from_state(&state);
        let listed: Vec<_> = certificate.gifts.iter().map(|g| g.name.clone()).collect();
        assert_eq!(listed, names);
    }

    #[test]
    fn download_passes_rendered_image_and_filename() {
        let renderer = TextRenderer { fail: false };
        let recorder = Recorder::default();
        assert!(block_on(download_certificate(&renderer, &recorder, &certificate())));
        assert_eq!(
            recorder.received.borrow().as_slice(),
            &[("Hoodie,Bean Bag Chair".to_string(), CERTIFICATE_FILENAME.to_string())]
        );
    }

    #[test]
    fn render_failure_is_contained() {
        let renderer = TextRenderer { fail: true };
        let recorder = Recorder {
            available: true,
            ..Recorder::default()
        };
        assert!(!block_on(download_certificate(&renderer, &recorder, &certificate())));
        assert!(!block_on(share_certificate(&renderer, &recorder, &certificate())));
        assert!(recorder.received.borrow().is_empty());
    }

    #[test]
    fn share_skipped_when_unsupported() {
        let renderer = TextRenderer { fail: false };
        let recorder = Recorder::default();
        assert!(!block_on(share_certificate(&renderer, &recorder, &certificate())));

        let supported = Recorder {
            available: true,
            ..Recorder::default()
        };
        assert!(block_on(share_certificate(&renderer, &supported, &certificate())));
        assert_eq!(supported.received.borrow()[0].1, SHARE_TITLE);
    }
}
