//! Preview gallery: the two watermark pipelines behind the page.
//!
//! Each request runs, in order:
//!
//! 1. graphical pipeline: load base photo, draw the bitmap watermark, encode,
//!    base64
//! 2. text pipeline: load base photo, render and blend the text layer,
//!    encode, base64
//! 3. presentation: load the page template and fill `Image1`, `Image2` and
//!    `ImageType`
//!
//! Either both images render or the request fails. Every failure maps to a
//! 500 with a static body; error details only go to the log.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::config::GalleryConfig;
use crate::image_codec::{encode_to_base64, ImageError, OutputFormat};
use crate::presentation::{
    EndpointResponse, HtmlTemplate, TemplateError, RENDER_ERROR_BODY,
    TEMPLATE_EXECUTE_ERROR_BODY, TEMPLATE_LOAD_ERROR_BODY,
};
use crate::resource::ResourceReader;
use crate::watermark::{load_image, GraphicalWatermark, TextWatermark, WatermarkError};

/// Template slot for the graphical watermark image
pub const IMAGE1_SLOT: &str = "Image1";

/// Template slot for the text watermark image
pub const IMAGE2_SLOT: &str = "Image2";

/// Template slot for the MIME type shared by both images
pub const IMAGE_TYPE_SLOT: &str = "ImageType";

/// Which of the two image pipelines failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    Graphical,
    Text,
}

impl Pipeline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pipeline::Graphical => "graphical",
            Pipeline::Text => "text",
        }
    }
}

impl std::fmt::Display for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from rendering the gallery page
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error("{pipeline} pipeline failed: {source}")]
    Watermark {
        pipeline: Pipeline,
        #[source]
        source: WatermarkError,
    },

    #[error("{pipeline} pipeline failed to encode: {source}")]
    Encode {
        pipeline: Pipeline,
        #[source]
        source: ImageError,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl GalleryError {
    /// Static response body for this error
    pub fn response_body(&self) -> &'static str {
        match self {
            GalleryError::Watermark { .. } | GalleryError::Encode { .. } => RENDER_ERROR_BODY,
            GalleryError::Template(TemplateError::Load { .. }) => TEMPLATE_LOAD_ERROR_BODY,
            GalleryError::Template(TemplateError::Execute { .. }) => TEMPLATE_EXECUTE_ERROR_BODY,
        }
    }

    /// Short machine-readable kind, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            GalleryError::Watermark { source, .. } => source.kind(),
            GalleryError::Encode { .. } => "encode_failure",
            GalleryError::Template(TemplateError::Load { .. }) => "template_load_failure",
            GalleryError::Template(TemplateError::Execute { .. }) => "template_exec_failure",
        }
    }
}

/// Base64-encoded images for the two template slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImages {
    /// Photo with the bitmap watermark
    pub image1: String,
    /// Photo with the text watermark
    pub image2: String,
    /// MIME type of both payloads, for the `data:` URIs
    pub content_type: &'static str,
}

/// Renders the preview page from immutable configuration.
///
/// Cheap to clone; nothing decoded is kept between requests.
#[derive(Clone)]
pub struct Gallery {
    config: Arc<GalleryConfig>,
    reader: Arc<dyn ResourceReader>,
    graphical: GraphicalWatermark,
    text: TextWatermark,
}

impl std::fmt::Debug for Gallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("config", &self.config)
            .field("graphical", &self.graphical)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

impl Gallery {
    /// Build a gallery; fails if the text color does not parse.
    pub fn new(
        config: GalleryConfig,
        reader: Arc<dyn ResourceReader>,
    ) -> Result<Self, WatermarkError> {
        let graphical = config.graphical.to_watermark();
        let text = config.text.to_watermark()?;

        Ok(Self {
            config: Arc::new(config),
            reader,
            graphical,
            text,
        })
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Run both image pipelines.
    pub fn render_images(&self) -> Result<GalleryImages, GalleryError> {
        let image1 = self.render_graphical()?;
        let image2 = self.render_text()?;
        Ok(GalleryImages {
            image1,
            image2,
            content_type: self.content_type(),
        })
    }

    /// Render the full page, mapping every failure to a 500.
    pub fn render_page(&self) -> EndpointResponse {
        let request_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("gallery", request_id = %request_id);
        let _guard = span.enter();

        let start = Instant::now();
        match self.try_render_page() {
            Ok(body) => {
                tracing::info!(
                    bytes = body.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Rendered gallery page"
                );
                EndpointResponse::html(body)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    kind = e.kind(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Failed to render gallery page"
                );
                EndpointResponse::internal_error(e.response_body())
            }
        }
    }

    fn try_render_page(&self) -> Result<String, GalleryError> {
        let images = self.render_images()?;

        let template = HtmlTemplate::load(self.reader.as_ref(), &self.config.template)?;

        let mut values = HashMap::new();
        values.insert(IMAGE1_SLOT, images.image1);
        values.insert(IMAGE2_SLOT, images.image2);
        values.insert(IMAGE_TYPE_SLOT, images.content_type.to_string());

        Ok(template.render(&values)?)
    }

    /// MIME type of the configured output format.
    ///
    /// An unsupported format encodes to empty payloads; those are labelled
    /// as JPEG.
    pub fn content_type(&self) -> &'static str {
        self.config
            .output_format
            .parse::<OutputFormat>()
            .unwrap_or(OutputFormat::Jpeg)
            .content_type()
    }

    fn render_graphical(&self) -> Result<String, GalleryError> {
        let pipeline = Pipeline::Graphical;
        let source = &self.config.graphical;
        let start = Instant::now();

        let base = load_image(self.reader.as_ref(), &source.base_image)
            .map_err(|e| watermark_error(pipeline, e))?;
        let watermarked = self
            .graphical
            .apply_to_image(&base, self.reader.as_ref())
            .map_err(|e| watermark_error(pipeline, e))?;

        let encoded = self.encode(pipeline, &watermarked)?;

        tracing::debug!(
            pipeline = %pipeline,
            base_image = %source.base_image,
            width = watermarked.width(),
            height = watermarked.height(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Rendered image"
        );

        Ok(encoded)
    }

    fn render_text(&self) -> Result<String, GalleryError> {
        let pipeline = Pipeline::Text;
        let source = &self.config.text;
        let start = Instant::now();

        let base = load_image(self.reader.as_ref(), &source.base_image)
            .map_err(|e| watermark_error(pipeline, e))?;
        let watermarked = self
            .text
            .create_watermarked_image(&base, self.reader.as_ref())
            .map_err(|e| watermark_error(pipeline, e))?;

        let encoded = self.encode(pipeline, &watermarked)?;

        tracing::debug!(
            pipeline = %pipeline,
            base_image = %source.base_image,
            width = watermarked.width(),
            height = watermarked.height(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Rendered image"
        );

        Ok(encoded)
    }

    fn encode(&self, pipeline: Pipeline, image: &image::RgbaImage) -> Result<String, GalleryError> {
        encode_to_base64(
            image,
            &self.config.output_format,
            self.config.encoder_quality(),
        )
        .map_err(|source| GalleryError::Encode { pipeline, source })
    }
}

fn watermark_error(pipeline: Pipeline, source: WatermarkError) -> GalleryError {
    GalleryError::Watermark { pipeline, source }
}
