//! Surface configuration policy, kept free of live GPU objects so it can be tested.

use super::SurfaceErrorAction;

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = caps.formats.first().copied()?;
    if !prefer_srgb {
        return caps.formats.iter().copied().find(|f| !f.is_srgb()).or(Some(first));
    }

    [wgpu::TextureFormat::Bgra8UnormSrgb, wgpu::TextureFormat::Rgba8UnormSrgb]
        .into_iter()
        .find(|f| caps.formats.contains(f))
        .or(Some(first))
}

/// Format of the color view frames are rendered through. Without sRGB encoding an
/// sRGB-only surface is viewed through its linear twin.
pub(crate) fn choose_view_format(
    surface_format: wgpu::TextureFormat,
    prefer_srgb: bool,
) -> wgpu::TextureFormat {
    if prefer_srgb {
        surface_format
    } else {
        surface_format.remove_srgb_suffix()
    }
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Vsync keeps FIFO (always supported). Without vsync, prefer Mailbox, then Immediate.
pub(crate) fn choose_present_mode(
    caps: &wgpu::SurfaceCapabilities,
    vsync: bool,
) -> wgpu::PresentMode {
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    [wgpu::PresentMode::Mailbox, wgpu::PresentMode::Immediate]
        .into_iter()
        .find(|m| caps.present_modes.contains(m))
        .unwrap_or(wgpu::PresentMode::Fifo)
}

/// Maps an acquire error to what the frame loop should do. `Reconfigured` means the
/// caller must reconfigure the surface before the next acquire.
pub(crate) fn classify_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(
        formats: Vec<wgpu::TextureFormat>,
        present_modes: Vec<wgpu::PresentMode>,
        alpha_modes: Vec<wgpu::CompositeAlphaMode>,
    ) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            present_modes,
            alpha_modes,
            ..Default::default()
        }
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn no_formats_is_none() {
        assert_eq!(choose_surface_format(&caps(vec![], vec![], vec![]), true), None);
    }

    #[test]
    fn prefers_srgb_when_available() {
        let c = caps(
            vec![wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Rgba8UnormSrgb],
            vec![],
            vec![],
        );
        assert_eq!(choose_surface_format(&c, true), Some(wgpu::TextureFormat::Rgba8UnormSrgb));
        assert_eq!(choose_surface_format(&c, false), Some(wgpu::TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn default_init_stores_shader_output_unencoded() {
        let prefer_srgb = crate::device::GpuInit::default().prefer_srgb;
        let c = caps(
            vec![wgpu::TextureFormat::Bgra8UnormSrgb, wgpu::TextureFormat::Bgra8Unorm],
            vec![],
            vec![],
        );
        let format = choose_surface_format(&c, prefer_srgb).unwrap();
        assert_eq!(format, wgpu::TextureFormat::Bgra8Unorm);
        assert!(!choose_view_format(format, prefer_srgb).is_srgb());
    }

    #[test]
    fn srgb_only_surface_gets_linear_view() {
        let c = caps(vec![wgpu::TextureFormat::Rgba8UnormSrgb], vec![], vec![]);
        let format = choose_surface_format(&c, false).unwrap();
        assert_eq!(format, wgpu::TextureFormat::Rgba8UnormSrgb);
        assert_eq!(choose_view_format(format, false), wgpu::TextureFormat::Rgba8Unorm);
        assert_eq!(choose_view_format(format, true), wgpu::TextureFormat::Rgba8UnormSrgb);
    }

    #[test]
    fn falls_back_to_first_format() {
        let c = caps(vec![wgpu::TextureFormat::Rgba16Float], vec![], vec![]);
        assert_eq!(choose_surface_format(&c, true), Some(wgpu::TextureFormat::Rgba16Float));
    }

    // ── alpha ─────────────────────────────────────────────────────────────

    #[test]
    fn unsupported_alpha_request_uses_first_supported() {
        let c = caps(vec![], vec![], vec![wgpu::CompositeAlphaMode::Opaque]);
        assert_eq!(
            choose_alpha_mode(&c, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&caps(vec![], vec![], vec![]), None), wgpu::CompositeAlphaMode::Auto);
    }

    // ── present mode ──────────────────────────────────────────────────────

    #[test]
    fn vsync_is_fifo() {
        let c = caps(vec![], vec![wgpu::PresentMode::Mailbox, wgpu::PresentMode::Fifo], vec![]);
        assert_eq!(choose_present_mode(&c, true), wgpu::PresentMode::Fifo);
    }

    #[test]
    fn no_vsync_prefers_mailbox_then_immediate() {
        let both = caps(vec![], vec![wgpu::PresentMode::Immediate, wgpu::PresentMode::Mailbox], vec![]);
        assert_eq!(choose_present_mode(&both, false), wgpu::PresentMode::Mailbox);

        let immediate = caps(vec![], vec![wgpu::PresentMode::Fifo, wgpu::PresentMode::Immediate], vec![]);
        assert_eq!(choose_present_mode(&immediate, false), wgpu::PresentMode::Immediate);

        let fifo = caps(vec![], vec![wgpu::PresentMode::Fifo], vec![]);
        assert_eq!(choose_present_mode(&fifo, false), wgpu::PresentMode::Fifo);
    }

    // ── errors ────────────────────────────────────────────────────────────

    #[test]
    fn surface_error_policy() {
        assert_eq!(classify_surface_error(&wgpu::SurfaceError::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(classify_surface_error(&wgpu::SurfaceError::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(classify_surface_error(&wgpu::SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(classify_surface_error(&wgpu::SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
    }
}
