use heartglow_platform::{MonitorRect, OverlayOptions, OverlayPlatform, OverlayWindow, Result};
use tracing::{info, warn};

use std::mem::size_of;

use windows::core::{Error, PCWSTR};
use windows::Win32::Foundation::{BOOL, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HBRUSH, HDC, HMONITOR, MONITORINFO,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::HiDpi::{GetDpiForMonitor, MDT_EFFECTIVE_DPI};
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::surface::WinOverlaySurface;

pub const OVERLAY_WINDOW_CLASS_NAME: PCWSTR = windows::core::w!("HeartglowOverlayClass");

const MONITORINFOF_PRIMARY: u32 = 1;

#[derive(Debug, Clone, Copy)]
struct DisplayInfo {
    rect: MonitorRect,
    primary: bool,
}

unsafe fn register_overlay_window_class(hinstance: HINSTANCE) -> PCWSTR {
    let window_class = WNDCLASSW {
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(handle_overlay_window_message),
        hInstance: hinstance,
        hIcon: LoadIconW(None, IDI_APPLICATION).unwrap_or_default(),
        hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
        hbrBackground: HBRUSH(std::ptr::null_mut()),
        lpszClassName: OVERLAY_WINDOW_CLASS_NAME,
        ..Default::default()
    };
    let _atom = RegisterClassW(&window_class);
    OVERLAY_WINDOW_CLASS_NAME
}

/// Creates full-screen, color-keyed, topmost overlays through Win32.
pub struct WinOverlayPlatform {
    hinstance_value: isize,
    class_name_ptr: isize,
}

impl WinOverlayPlatform {
    pub fn new() -> Result<Self> {
        let hinstance = unsafe { HINSTANCE(GetModuleHandleW(None)?.0) };
        let class_name = unsafe { register_overlay_window_class(hinstance) };
        Ok(Self {
            hinstance_value: hinstance.0 as isize,
            class_name_ptr: class_name.0 as isize,
        })
    }

    fn enumerate_displays() -> Result<Vec<DisplayInfo>> {
        unsafe extern "system" fn enum_proc(
            hmonitor: HMONITOR,
            _hdc: HDC,
            _lprc: *mut RECT,
            lparam: LPARAM,
        ) -> BOOL {
            let data_ptr = lparam.0 as *mut Vec<DisplayInfo>;
            if data_ptr.is_null() {
                return BOOL(0);
            }
            let data = &mut *data_ptr;
            let mut info = MONITORINFO {
                cbSize: size_of::<MONITORINFO>() as u32,
                ..Default::default()
            };
            if !GetMonitorInfoW(hmonitor, &mut info).as_bool() {
                return BOOL(1);
            }
            let rect = info.rcMonitor;
            let mut dpi_x = 96u32;
            let mut dpi_y = 96u32;
            if let Err(err) = GetDpiForMonitor(hmonitor, MDT_EFFECTIVE_DPI, &mut dpi_x, &mut dpi_y)
            {
                warn!(
                    "GetDpiForMonitor failed for monitor {:?}: {err}",
                    hmonitor.0
                );
                dpi_x = 96;
            }
            data.push(DisplayInfo {
                rect: MonitorRect {
                    x: rect.left,
                    y: rect.top,
                    width: rect.right - rect.left,
                    height: rect.bottom - rect.top,
                    dpi: dpi_x,
                },
                primary: info.dwFlags & MONITORINFOF_PRIMARY != 0,
            });
            BOOL(1)
        }

        let mut displays: Vec<DisplayInfo> = Vec::new();
        let lparam = LPARAM(&mut displays as *mut _ as isize);
        unsafe {
            let result = EnumDisplayMonitors(None, None, Some(enum_proc), lparam);
            if result == BOOL(0) {
                return Err(Error::from_win32().into());
            }
        }
        Ok(displays)
    }
}

impl OverlayPlatform for WinOverlayPlatform {
    type Surface = WinOverlaySurface;

    fn primary_monitor(&self) -> Result<MonitorRect> {
        let displays = Self::enumerate_displays()?;
        info!(
            "found {} display(s): {}",
            displays.len(),
            displays
                .iter()
                .map(|d| format!(
                    "[{}x{} @ ({}, {}) dpi {}{}]",
                    d.rect.width,
                    d.rect.height,
                    d.rect.x,
                    d.rect.y,
                    d.rect.dpi,
                    if d.primary { " primary" } else { "" }
                ))
                .collect::<Vec<_>>()
                .join(", ")
        );
        displays
            .iter()
            .find(|d| d.primary)
            .or_else(|| displays.first())
            .map(|d| d.rect)
            .ok_or_else(|| "no active displays".into())
    }

    fn create_overlay(
        &mut self,
        rect: &MonitorRect,
        options: &OverlayOptions,
    ) -> Result<Self::Surface> {
        let hwnd = unsafe {
            create_overlay_hwnd(self.hinstance_value, self.class_name_ptr, rect, options)?
        };
        let mut surface = WinOverlaySurface::new(hwnd, rect, options)?;
        surface.set_click_through(options.click_through)?;
        surface.set_always_on_top(options.always_on_top)?;
        surface.show();
        info!(
            "overlay window created: {}x{} click-through={} topmost={}",
            rect.width, rect.height, options.click_through, options.always_on_top
        );
        Ok(surface)
    }
}

pub unsafe extern "system" fn handle_overlay_window_message(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_NCHITTEST => {
            let ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE) as u32;
            if ex_style & WS_EX_TRANSPARENT.0 != 0 {
                LRESULT(HTTRANSPARENT as isize)
            } else {
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }
        }
        WM_CLOSE => {
            // Surfaces as CloseRequested in the frame loop; the surface owns destruction.
            PostQuitMessage(0);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

unsafe fn create_overlay_hwnd(
    hinstance_value: isize,
    class_name_ptr: isize,
    rect: &MonitorRect,
    options: &OverlayOptions,
) -> Result<HWND> {
    let hinstance = HINSTANCE(hinstance_value as *mut core::ffi::c_void);
    let title: Vec<u16> = options.title.encode_utf16().chain(Some(0)).collect();
    let hwnd = CreateWindowExW(
        WINDOW_EX_STYLE(WS_EX_LAYERED.0 | WS_EX_TOOLWINDOW.0 | WS_EX_NOACTIVATE.0),
        PCWSTR(class_name_ptr as *const u16),
        PCWSTR(title.as_ptr()),
        WS_POPUP,
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        None,
        None,
        hinstance,
        None,
    )?;
    Ok(hwnd)
}
